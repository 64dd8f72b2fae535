//! # Sprite Text
//!
//! Text rendering from a pre-baked glyph sprite sheet.
//!
//! ## Features
//!
//! - **Glyph Tables**: contiguous rune ranges mapped to atlas rectangles and advances
//! - **Metrics**: integer pixel extents of a string along either render direction
//! - **Composition**: strings turned into groups of positioned glyph quads
//! - **Pluggable GPU layer**: textures, programs and quads live behind traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut backend = HeadlessBackend::new();
//!     let image = ImageData::from_file("resources/fonts/mono_8x12.png")?;
//!     let config = FontConfig::load_from_file("resources/fonts/mono_8x12.toml")?;
//!
//!     let font = load_sprite_font(&mut backend, &image, config)?;
//!     if let Some(mut text) = font.printf(format_args!("Score: {}", 1200))? {
//!         text.attach_to_world(&World::new(800, 600));
//!         text.move_to(20.0, 20.0);
//!         text.draw(&mut backend)?;
//!     }
//!
//!     font.release(&mut backend);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod text;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData},
        config::{Config, ConfigError},
        foundation::math::{Mat4, Point2, Vec2},
        render::{
            AtlasTexture, HeadlessBackend, PixelRect, ProgramHandle, QuadHandle, RenderError,
            ShapeBackend, Texture, TextureHandle, TextureUploader, World,
        },
        text::{
            load_font, load_sprite_font, Font, FontConfig, FontError, FontResult,
            GlyphDescriptor, GlyphTable, RenderDirection, TextGroup,
        },
    };
}
