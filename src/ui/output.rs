use iced::widget::{button, column, container, image as image_widget, text};
use iced::{Alignment, Element, Length};

use crate::state::{OutputView, Session};
use crate::Message;

/// The output pane
///
/// Shows exactly one of: the loading indicator, the error panel, the
/// generated image with its download button, or the empty-state hint.
/// Precedence follows `Session::output_view`.
pub fn output_panel<'a>(
    session: &'a Session,
    generated_preview: Option<&image_widget::Handle>,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match session.output_view() {
        OutputView::Loading => column![
            text("Generating your image...").size(20),
            text("This can take a moment.").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),

        OutputView::Error(message) => column![
            text("Generation Failed").size(20).style(text::danger),
            text(message).size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),

        OutputView::Generated(image) => {
            let mut result = column![].spacing(10).align_x(Alignment::Center);

            if let Some(handle) = generated_preview {
                result = result.push(image_widget(handle.clone()).width(Length::Fill));
            }

            result = result.push(
                button("Download")
                    .on_press(Message::SaveImage)
                    .padding(10),
            );
            result = result.push(
                text(format!("{} · {} KB", image.mime_type, image.size_kb())).size(12),
            );

            result.into()
        }

        OutputView::Empty => column![
            text("Your generated image will appear here").size(18),
            text("Upload an image and select a style to begin.").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(20)
        .into()
}
