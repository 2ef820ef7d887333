//! Modal confirmation shown when the user asks to quit, gating the bulk
//! delete of viewed source images.

use crate::message::Message;
use iced::widget::{button, center, column, container, opaque, row, text};
use iced::{Background, Color, Element, Theme};

pub fn view(viewed_count: usize) -> Element<'static, Message> {
    let plural = if viewed_count == 1 { "image" } else { "images" };
    let prompt = text(format!(
        "Delete the {viewed_count} viewed {plural} from the source folder before quitting?"
    ));

    let choices = row![
        button("Delete viewed & quit")
            .on_press(Message::DeleteViewedAndQuit)
            .style(button::danger),
        button("Quit").on_press(Message::QuitWithoutDeleting),
        button("Keep browsing").on_press(Message::CancelExit),
    ]
    .spacing(12);

    let card = container(column![prompt, choices].spacing(20))
        .padding(24)
        .max_width(520)
        .style(card_style);

    opaque(center(card).style(backdrop_style))
}

fn card_style(theme: &Theme) -> iced::widget::container::Style {
    let palette = theme.extended_palette();

    iced::widget::container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: iced::border::Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: iced::border::Radius::new(8.0),
        },
        ..Default::default()
    }
}

fn backdrop_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::BLACK.scale_alpha(0.6))),
        ..Default::default()
    }
}
