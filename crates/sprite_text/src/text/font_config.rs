//! Font configuration: rune range, direction and glyph table

use serde::{Deserialize, Serialize};
use super::{FontError, FontResult, GlyphDescriptor, GlyphTable, RenderDirection};
use crate::config::Config;

/// Metadata describing a sprite-sheet font
///
/// Covers the runes `low..high`; `glyphs[i]` describes `low + i`. Glyph
/// rectangles are expected at final scale, nothing downstream rescales them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// First rune in the font
    pub low: char,
    /// One past the last rune in the font
    pub high: char,
    /// Layout axis
    #[serde(default)]
    pub direction: RenderDirection,
    /// Glyphs in rune order
    pub glyphs: GlyphTable,
}

impl Config for FontConfig {}

/// Uniform-cell sprite sheet description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Cells per atlas row
    pub columns: u32,
    /// Advance applied to every glyph
    pub advance: u32,
}

impl FontConfig {
    /// Create a validated configuration
    pub fn new(
        low: char,
        high: char,
        direction: RenderDirection,
        glyphs: GlyphTable,
    ) -> FontResult<Self> {
        let config = Self { low, high, direction, glyphs };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration for a sheet whose glyphs sit in a fixed grid,
    /// row-major from the top-left, starting with `low`
    pub fn from_grid(
        low: char,
        high: char,
        direction: RenderDirection,
        grid: &GridLayout,
    ) -> FontResult<Self> {
        if grid.columns == 0 {
            return Err(FontError::InvalidConfig("grid needs at least one column".to_string()));
        }
        let count = Self::range_len(low, high)?;
        let count = u32::try_from(count)
            .map_err(|_| FontError::InvalidConfig(format!("{count} glyphs do not fit a grid")))?;

        let glyphs = (0..count)
            .map(|i| {
                GlyphDescriptor::new(
                    (i % grid.columns) * grid.cell_width,
                    (i / grid.columns) * grid.cell_height,
                    grid.cell_width,
                    grid.cell_height,
                    grid.advance,
                )
            })
            .collect();

        Self::new(low, high, direction, glyphs)
    }

    fn range_len(low: char, high: char) -> FontResult<usize> {
        (high as u32)
            .checked_sub(low as u32)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(FontError::InvalidRange { low, high })
    }

    /// Check the range against the glyph table
    pub fn validate(&self) -> FontResult<()> {
        let expected = Self::range_len(self.low, self.high)?;
        if self.glyphs.len() != expected {
            return Err(FontError::GlyphCountMismatch {
                expected,
                actual: self.glyphs.len(),
            });
        }
        Ok(())
    }

    /// Checked lookup of a rune
    pub fn glyph(&self, rune: char) -> Option<(usize, &GlyphDescriptor)> {
        self.glyphs.lookup(self.low, rune)
    }

    /// Whether the font has a glyph for `rune`
    pub fn contains(&self, rune: char) -> bool {
        self.glyphs.index_of(self.low, rune).is_some()
    }
}
