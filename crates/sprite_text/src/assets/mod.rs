//! Asset loading for sprite sheets

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Pixel data does not match its declared dimensions
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}
