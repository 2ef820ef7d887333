use crate::app::Browser;
use crate::components::toast;
use crate::message::Message;
use crate::views::confirm_exit;
use iced::widget::{center, container, stack, text, Image};
use iced::{Element, Length, Size};

pub fn view(browser: &Browser, viewport: Size) -> Element<'_, Message> {
    let image_area: Element<'_, Message> = if let Some(image) = &browser.image {
        Image::new(image.current_handle().clone())
            .content_fit(image.fit_mode(viewport))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    } else if let Some(error) = &browser.load_error {
        center(text(error).style(text::danger)).into()
    } else {
        center(text("Nothing to display")).into()
    };

    let mut layers = stack![container(image_area)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(8)];

    if let Some(message) = browser.notice.text() {
        layers = layers.push(toast(message));
    }

    if browser.confirm_exit {
        layers = layers.push(confirm_exit::view(browser.session.viewed().len()));
    }

    layers.into()
}
