//! Font atlas glyph metrics

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placement of one glyph inside the atlas texture, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphInfo {
    /// Left edge in the atlas
    pub x: f32,
    /// Top edge in the atlas
    pub y: f32,
    /// Glyph width (also the pen advance)
    pub width: f32,
    /// Glyph height
    pub height: f32,
}

/// Glyph table for a bitmap font
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontAtlas {
    /// Atlas texture width in pixels
    pub width: f32,
    /// Atlas texture height in pixels
    pub height: f32,
    glyphs: HashMap<char, GlyphInfo>,
}

impl FontAtlas {
    /// Create an empty atlas of the given texture size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            glyphs: HashMap::new(),
        }
    }

    /// Builder pattern: add a glyph
    pub fn with_glyph(mut self, c: char, glyph: GlyphInfo) -> Self {
        self.glyphs.insert(c, glyph);
        self
    }

    /// Look up a glyph
    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    /// Number of glyphs in the table
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Fixed-pitch atlas laid out as a grid, one cell per character of `chars`
    pub fn monospace_grid(chars: &str, cell_width: f32, cell_height: f32, columns: usize) -> Self {
        let columns = columns.max(1);
        let rows = chars.chars().count().div_ceil(columns).max(1);
        let mut atlas = Self::new(cell_width * columns as f32, cell_height * rows as f32);
        for (i, c) in chars.chars().enumerate() {
            let glyph = GlyphInfo {
                x: (i % columns) as f32 * cell_width,
                y: (i / columns) as f32 * cell_height,
                width: cell_width,
                height: cell_height,
            };
            atlas.glyphs.insert(c, glyph);
        }
        atlas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_grid_layout() {
        let atlas = FontAtlas::monospace_grid("abcde", 8.0, 16.0, 4);

        assert_eq!(atlas.glyph_count(), 5);
        assert_eq!(atlas.width, 32.0);
        assert_eq!(atlas.height, 32.0);

        let e = atlas.glyph('e').unwrap();
        assert_eq!((e.x, e.y), (0.0, 16.0));
        assert!(atlas.glyph('z').is_none());
    }
}
