//! Bitmap font renderer for the segmented-display text fields.
//!
//! Characters map to a (row, column) cell on the text sprite sheet. The
//! renderer only computes which cell to show; the components in
//! `components::text` turn the result into styled nodes.

use std::collections::HashMap;

/// Width of one cell on the text sprite sheet, in pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Height of one cell on the text sprite sheet, in pixels.
pub const GLYPH_HEIGHT: u32 = 6;
/// Width of one digit on the large numbers sprite sheet, in pixels.
pub const DIGIT_WIDTH: u32 = 9;

// Order matters: later entries replace earlier ones for the same key.
#[rustfmt::skip]
const FONT_TABLE: &[(char, u32, u32)] = &[
    ('a', 0, 0), ('b', 0, 1), ('c', 0, 2), ('d', 0, 3), ('e', 0, 4), ('f', 0, 5),
    ('g', 0, 6), ('h', 0, 7), ('i', 0, 8), ('j', 0, 9), ('k', 0, 10),
    ('l', 0, 11), ('m', 0, 12), ('n', 0, 13), ('o', 0, 14), ('p', 0, 15),
    ('q', 0, 16), ('r', 0, 17), ('s', 0, 18), ('t', 0, 19), ('u', 0, 20),
    ('v', 0, 21), ('w', 0, 22), ('x', 0, 23), ('y', 0, 24), ('z', 0, 25),
    ('"', 0, 26), ('@', 0, 27), (' ', 0, 29), ('0', 1, 0), ('1', 1, 1),
    ('2', 1, 2), ('3', 1, 3), ('4', 1, 4), ('5', 1, 5), ('6', 1, 6), ('7', 1, 7),
    ('8', 1, 8), ('9', 1, 9), (' ', 1, 10), ('_', 1, 11), (':', 1, 12),
    ('(', 1, 13), (')', 1, 14), ('-', 1, 15), ('\'', 1, 16), ('!', 1, 17),
    ('_', 1, 18), ('+', 1, 19), ('\\', 1, 20), ('/', 1, 21), ('[', 1, 22),
    (']', 1, 23), ('^', 1, 24), ('&', 1, 25), ('%', 1, 26), ('.', 1, 27),
    ('=', 1, 28), ('$', 1, 29), ('#', 1, 30), ('å', 2, 0), ('ö', 2, 1),
    ('ä', 2, 2), ('?', 2, 3), ('*', 2, 4), (' ', 2, 5),
];

/// A cell on the text sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPosition {
    pub row: u32,
    pub column: u32,
}

impl GlyphPosition {
    /// Pixel offset of this cell as `(horizontal, vertical)`.
    pub fn offset(self) -> (u32, u32) {
        (self.column * GLYPH_WIDTH, self.row * GLYPH_HEIGHT)
    }

    pub fn background_position(self) -> String {
        let (x, y) = self.offset();
        format!("-{x}px -{y}px")
    }
}

/// One character resolved against the font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub character: char,
    pub position: GlyphPosition,
}

impl Glyph {
    pub fn style(&self) -> String {
        format!("background-position: {};", self.position.background_position())
    }
}

#[derive(Debug, Clone)]
pub struct Font {
    lookup: HashMap<char, GlyphPosition>,
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}

impl Font {
    pub fn new() -> Self {
        let lookup = FONT_TABLE
            .iter()
            .map(|&(ch, row, column)| (ch, GlyphPosition { row, column }))
            .collect();
        Self { lookup }
    }

    fn space(&self) -> GlyphPosition {
        self.lookup
            .get(&' ')
            .copied()
            .unwrap_or(GlyphPosition { row: 0, column: 0 })
    }

    /// Sprite cell for a character. Unmapped characters use the space cell.
    pub fn char_position(&self, character: char) -> GlyphPosition {
        self.lookup
            .get(&character)
            .copied()
            .unwrap_or_else(|| self.space())
    }

    /// Resolve a single character, lowercasing it first.
    pub fn character_glyph(&self, character: char) -> Glyph {
        // Multi-char lowercase expansions (e.g. 'İ') keep only the first char.
        let lowered = character.to_lowercase().next().unwrap_or(character);
        Glyph {
            character: lowered,
            position: self.char_position(lowered),
        }
    }

    /// Build a fresh glyph sequence for a whole string.
    pub fn string_glyphs(&self, text: &str) -> Vec<Glyph> {
        text.chars().map(|ch| self.character_glyph(ch)).collect()
    }

    /// Glyph for a single decimal digit. Values above 9 have no single
    /// character and render as a space.
    pub fn digit_glyph(&self, digit: u32) -> Glyph {
        let character = char::from_digit(digit, 10).unwrap_or(' ');
        self.character_glyph(character)
    }
}

/// Background position of a digit on the large numbers sprite sheet.
pub fn digit_background_position(digit: u32) -> String {
    format!("-{}px 0", digit * DIGIT_WIDTH)
}
