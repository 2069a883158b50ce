use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::CardConfig;
use crate::geometry::Rect;

use super::blend::{fill_rounded_rect, stroke_rounded_rect};
use super::text::draw_text;

/// Dish details burned into the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoCard {
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// Shorten long descriptions to `keep` characters plus an ellipsis.
pub fn truncate_description(description: &str, limit: usize, keep: usize) -> String {
    if description.chars().count() > limit {
        let mut out: String = description.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        description.to_string()
    }
}

pub fn format_price(symbol: &str, price: f64) -> String {
    format!("{symbol}{price:.2}")
}

/// Card position on a canvas `canvas_height` pixels tall.
pub fn card_rect(canvas_height: u32, config: &CardConfig) -> Rect {
    Rect::new(
        config.margin_left as f64,
        canvas_height as f64 - config.height as f64 - config.margin_bottom as f64,
        config.width as f64,
        config.height as f64,
    )
}

pub fn draw_info_card(canvas: &mut RgbaImage, card: &InfoCard, config: &CardConfig) {
    let rect = card_rect(canvas.height(), config);

    fill_rounded_rect(canvas, rect, config.corner_radius, config.fill);
    if config.border_width > 0.0 {
        stroke_rounded_rect(
            canvas,
            rect,
            config.corner_radius,
            config.border_width,
            config.border,
        );
    }

    let text_x = rect.x as i64 + config.padding_left;
    let top = rect.y as i64;

    draw_text(
        canvas,
        text_x,
        top + config.title.baseline,
        &card.title,
        &config.title,
    );

    let description = truncate_description(
        &card.description,
        config.description_limit,
        config.description_keep,
    );
    draw_text(
        canvas,
        text_x,
        top + config.description.baseline,
        &description,
        &config.description,
    );

    draw_text(
        canvas,
        text_x,
        top + config.price.baseline,
        &format_price(&config.currency_symbol, card.price),
        &config.price,
    );
}
