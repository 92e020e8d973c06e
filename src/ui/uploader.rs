use iced::widget::{button, column, container, image as image_widget, text};
use iced::{Alignment, Element, Length};

use crate::Message;

/// The "1. Upload Product Image" section
///
/// Shows the browse button, the drop hint, and a preview of the
/// current upload once there is one.
pub fn uploader(preview: Option<&image_widget::Handle>) -> Element<'_, Message> {
    let mut content = column![
        text("1. Upload Product Image").size(20),
        button("Browse Files").on_press(Message::PickImage).padding(10),
        text("...or drop a PNG, JPEG, or WEBP file onto the window").size(13),
    ]
    .spacing(10)
    .align_x(Alignment::Start);

    if let Some(handle) = preview {
        content = content.push(
            image_widget(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(180.0)),
        );
    }

    container(content).width(Length::Fill).into()
}
