//! Text rendering system
//!
//! This module turns strings into positioned glyph quads cut from a single
//! sprite-sheet texture.
//!
//! # Architecture
//!
//! - [`GlyphTable`]: per-rune atlas rectangles, advances and texture coordinates
//! - [`FontConfig`]: rune range, render direction and glyph table
//! - [`Font`]: GPU resources for one sprite sheet plus metrics
//! - [`TextGroup`]: a composed string, ready to move, rotate and draw
//!
//! # Example
//!
//! ```no_run
//! use sprite_text::render::{HeadlessBackend, TextureUploader};
//! use sprite_text::text::{load_font, FontConfig, GridLayout, RenderDirection};
//! use sprite_text::assets::ImageData;
//!
//! let mut backend = HeadlessBackend::new();
//! let sheet = ImageData::from_file("resources/fonts/mono_8x12.png")?;
//! let texture = backend.upload_rgba_image(&sheet)?;
//!
//! let grid = GridLayout { cell_width: 8, cell_height: 12, columns: 16, advance: 8 };
//! let config = FontConfig::from_grid(' ', '\u{7f}', RenderDirection::LeftToRight, &grid)?;
//! let font = load_font(&mut backend, &texture, config)?;
//!
//! let (width, height) = font.metrics("Hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod direction;
mod font;
mod font_config;
mod glyph;
mod group;
mod layout;

pub use direction::RenderDirection;
pub use font::{load_font, load_sprite_font, Font};
pub use font_config::{FontConfig, GridLayout};
pub use glyph::{GlyphDescriptor, GlyphTable, TexCoords};
pub use group::{GlyphInstance, GlyphQuad, TextGroup};

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::render::{PixelRect, RenderError};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Rune range is inverted or cannot be represented
    #[error("Invalid rune range {low:?}..{high:?}")]
    InvalidRange {
        /// Lower rune bound
        low: char,
        /// Upper rune bound (exclusive)
        high: char,
    },

    /// Glyph table length does not match the rune range
    #[error("Glyph table has {actual} entries, rune range needs {expected}")]
    GlyphCountMismatch {
        /// `high - low`
        expected: usize,
        /// Entries actually present
        actual: usize,
    },

    /// A glyph rectangle extends past the atlas
    #[error("Glyph {index} at {rect:?} lies outside the {atlas_width}x{atlas_height} atlas")]
    GlyphOutsideAtlas {
        /// Table index of the glyph
        index: usize,
        /// Offending rectangle
        rect: PixelRect,
        /// Atlas width
        atlas_width: u32,
        /// Atlas height
        atlas_height: u32,
    },

    /// Texture has no pixels
    #[error("Font texture is empty")]
    EmptyTexture,

    /// Malformed configuration values
    #[error("Invalid font configuration: {0}")]
    InvalidConfig(String),

    /// Text formatting failed
    #[error("Failed to format text")]
    Format(#[from] std::fmt::Error),

    /// Backend failure
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Configuration file failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sprite sheet loading failure
    #[error(transparent)]
    Asset(#[from] AssetError),
}
