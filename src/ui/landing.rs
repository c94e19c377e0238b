/// Landing page layout
/// Hero, featured products, categories and latest products, top to bottom.
/// Empty sections are plain empty grids, there is no separate error state.
use iced::widget::{button, column, container, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length};

use crate::state::views::{CategoryTile, LandingViews, ProductCard};
use crate::Message;

/// Width of a product card in the featured grid
const CARD_WIDTH: f32 = 300.0;

/// Width of a category tile / latest card
const TILE_WIDTH: f32 = 240.0;

/// Characters of description shown on a featured card
const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Build the page from freshly derived views
pub fn view<'a>(views: LandingViews) -> Element<'a, Message> {
    let summary = format!(
        "{} products · {} categories",
        views.product_count, views.category_count
    );

    let content = column![
        hero(summary),
        section(
            "Featured products",
            grid(views.featured.into_iter().map(featured_card).collect()),
        ),
        section(
            "Categories",
            grid(views.categories.into_iter().map(category_tile).collect()),
        ),
        section(
            "Latest products",
            grid(views.latest.into_iter().map(latest_card).collect()),
        ),
    ]
    .spacing(32)
    .padding(24);

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn hero<'a>(summary: String) -> Element<'a, Message> {
    let content = column![
        text("New arrivals").size(12),
        text("Discover products you'll love").size(28),
        text("Browse categories and see the latest items in one simple app.").size(14),
        row![
            button("Refresh").on_press(Message::Refresh).padding(10),
            text(summary).size(12),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    ]
    .spacing(10);

    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(20), body].spacing(12).into()
}

// Cards flow onto new lines as the window narrows
fn grid<'a>(items: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    Row::with_children(items).spacing(16).wrap().into()
}

fn featured_card<'a>(card: ProductCard) -> Element<'a, Message> {
    let description = preview(&card.description, DESCRIPTION_PREVIEW_CHARS);

    let content: Column<Message> = column![
        text(card.image_url).size(10),
        row![
            text(card.title).size(16).width(Length::Fill),
            text(card.price_label).size(16),
        ]
        .spacing(12),
        text(card.category_label).size(12),
        text(description).size(13),
    ]
    .spacing(6);

    container(content)
        .padding(16)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::bordered_box)
        .into()
}

fn latest_card<'a>(card: ProductCard) -> Element<'a, Message> {
    let content = column![
        row![
            text(card.title).size(14).width(Length::Fill),
            text(card.price_label).size(14),
        ]
        .spacing(12),
        text(card.category_label).size(12),
        text(card.image_url).size(10),
    ]
    .spacing(4);

    container(content)
        .padding(16)
        .width(Length::Fixed(TILE_WIDTH))
        .style(container::bordered_box)
        .into()
}

fn category_tile<'a>(tile: CategoryTile) -> Element<'a, Message> {
    let content = column![
        text(tile.name).size(16),
        text("Tap to browse").size(12),
        text(tile.image_url).size(10),
    ]
    .spacing(4);

    container(content)
        .padding(16)
        .width(Length::Fixed(TILE_WIDTH))
        .style(container::bordered_box)
        .into()
}

/// Cut text to `max_chars` characters, marking the cut with an ellipsis
fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
