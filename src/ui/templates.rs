use std::collections::HashMap;

use iced::widget::{button, column, image as image_widget, text, text_input, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::catalog::{Catalog, Template};
use crate::state::Session;
use crate::Message;

/// Card width in the style grid
const CARD_WIDTH: f32 = 120.0;

/// Thumbnail edge length on a style card
const THUMBNAIL_SIZE: f32 = 96.0;

/// The "2. Choose a Style" section
///
/// One card per template, laid out in a wrapping grid. A card without
/// a fetched thumbnail just shows its name.
pub fn style_grid<'a>(
    catalog: &'a Catalog,
    session: &'a Session,
    thumbnails: &'a HashMap<String, image_widget::Handle>,
) -> Element<'a, Message> {
    let mut cards: Vec<Element<'a, Message>> = Vec::new();

    for template in catalog.templates() {
        let selected = session.selected_template_id() == Some(template.id.as_str());

        let mut card: Column<'a, Message> = Column::new()
            .spacing(6)
            .align_x(Alignment::Center)
            .width(Length::Fixed(CARD_WIDTH));

        if let Some(handle) = thumbnails.get(&template.id) {
            card = card.push(
                image_widget(handle.clone())
                    .width(Length::Fixed(THUMBNAIL_SIZE))
                    .height(Length::Fixed(THUMBNAIL_SIZE)),
            );
        }

        card = card.push(text(&template.name).size(13));

        let style = if selected {
            button::primary
        } else {
            button::secondary
        };

        cards.push(
            button(card)
                .style(style)
                .on_press(Message::SelectTemplate(template.id.clone()))
                .padding(8)
                .into(),
        );
    }

    let grid = Wrap::with_elements(cards).spacing(10.0).line_spacing(10.0);

    column![text("2. Choose a Style").size(20), grid]
        .spacing(10)
        .into()
}

/// The "3. Customize Details" section
///
/// Only shown when the selected template declares fields. Every
/// keystroke goes through the session so the generate gate updates
/// immediately.
pub fn detail_fields<'a>(template: &'a Template, session: &'a Session) -> Element<'a, Message> {
    let mut form = column![text("3. Customize Details").size(20)].spacing(10);

    for field in &template.fields {
        let field_id = field.id.clone();
        let input = text_input(&field.placeholder, session.input(&field.id))
            .on_input(move |value| Message::EditField(field_id.clone(), value))
            .padding(8);

        form = form.push(column![text(&field.label).size(13), input].spacing(4));
    }

    form.width(Length::Fill).into()
}
