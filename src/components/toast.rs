use crate::message::Message;
use iced::widget::{container, text};
use iced::{Alignment, Background, Color, Element, Length, Theme};

/// Dark pill with white text, pinned to the top-right corner of the
/// browser view. Display-only; dismissal is handled by the notice timer.
pub fn toast(message: &str) -> Element<'_, Message> {
    let pill = container(text(message).size(14))
        .padding(10)
        .style(toast_style);

    container(pill)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::End)
        .align_y(Alignment::Start)
        .padding(16)
        .into()
}

fn toast_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::BLACK.scale_alpha(0.85))),
        text_color: Some(Color::WHITE),
        border: iced::border::Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: iced::border::Radius::new(6.0),
        },
        ..Default::default()
    }
}
