use std::rc::Rc;

use dioxus::prelude::*;

use crate::font::{digit_background_position, Font};

/// Shared font instance, provided by the player window.
#[derive(Clone)]
pub struct FontHandle(pub Rc<Font>);

/// A text field rebuilt from scratch whenever its string changes.
#[component]
pub fn BitmapText(text: String) -> Element {
    let font = use_context::<FontHandle>();
    let glyphs = font.0.string_glyphs(&text);

    rsx! {
        div { class: "text",
            for (index, glyph) in glyphs.into_iter().enumerate() {
                div { key: "{index}", class: "character", style: glyph.style(), {glyph.character.to_string()} }
            }
        }
    }
}

/// A fixed node that is repainted in place with a new digit.
#[component]
pub fn GlyphCell(id: String, digit: u32) -> Element {
    let font = use_context::<FontHandle>();
    let glyph = font.0.digit_glyph(digit);
    let character = glyph.character;

    rsx! {
        div { id: "{id}", class: "character", style: glyph.style(), "{character}" }
    }
}

/// One digit from the large numbers sprite.
#[component]
pub fn LargeDigit(id: String, digit: u32) -> Element {
    let sprite = digit_background_position(digit);

    rsx! {
        div { id: "{id}",
            div { class: "digit", style: "background-position: {sprite};", "{digit}" }
        }
    }
}
