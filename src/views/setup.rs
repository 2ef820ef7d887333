use crate::app::Setup;
use crate::message::Message;
use iced::widget::{button, center, column, row, text, text_input};
use iced::{Alignment, Element};

pub fn view(setup: &Setup) -> Element<'_, Message> {
    let source_row = row![
        text_input("Folder with images to sort", &setup.source_input)
            .on_input(Message::SourceEdited)
            .padding(8),
        button("Browse…").on_press(Message::BrowseSource),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let output_row = row![
        text_input("Folder for kept images", &setup.output_input)
            .on_input(Message::OutputEdited)
            .padding(8),
        button("Browse…").on_press(Message::BrowseOutput),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut content = column![
        text("Snapsort").size(32),
        text("Pick a folder to sort through and a folder for the keepers."),
        source_row,
        output_row,
        button("Start sorting")
            .on_press(Message::StartBrowsing)
            .padding([8, 16]),
    ]
    .spacing(16)
    .max_width(560);

    if let Some(error) = &setup.error {
        content = content.push(text(error).style(text::danger));
    }

    center(content).padding(40).into()
}
