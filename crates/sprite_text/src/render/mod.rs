//! GPU-facing seams
//!
//! The text core never talks to a graphics API directly. Textures, shader
//! programs and textured quads are created and drawn through the
//! [`ShapeBackend`] and [`TextureUploader`] traits; [`HeadlessBackend`]
//! implements both in memory.

pub mod headless;
pub mod shaders;
pub mod world;

pub use headless::HeadlessBackend;
pub use shaders::ShaderSource;
pub use world::World;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;
use crate::assets::ImageData;
use crate::foundation::math::Mat4;

/// Result type for backend operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors reported by a shape/texture backend
#[derive(Debug, Error)]
pub enum RenderError {
    /// Shader program failed to compile or link
    #[error("Failed to create shader program: {0}")]
    ProgramCreation(String),

    /// Quad geometry could not be allocated
    #[error("Failed to create quad: {0}")]
    QuadCreation(String),

    /// Texture upload was rejected
    #[error("Failed to upload texture: {0}")]
    TextureUpload(String),

    /// A handle that the backend does not know about was used
    #[error("Unknown {kind} handle {id}")]
    UnknownHandle {
        /// Handle family ("quad", "texture", "program")
        kind: &'static str,
        /// Raw handle value
        id: u64,
    },
}

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle for a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Handle for a textured quad owned by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadHandle(pub u64);

/// Pixel-space rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Create a new rectangle
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `other` lies entirely inside this rectangle's extent
    pub const fn contains(&self, other: &Self) -> bool {
        other.x as u64 + other.width as u64 <= self.x as u64 + self.width as u64
            && other.y as u64 + other.height as u64 <= self.y as u64 + self.height as u64
            && other.x >= self.x
            && other.y >= self.y
    }
}

/// A texture living on the GPU
pub trait Texture {
    /// Pixel bounds of the texture
    fn bounds(&self) -> PixelRect;

    /// Opaque GPU handle
    fn id(&self) -> TextureHandle;
}

/// Plain texture record returned by uploaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasTexture {
    /// GPU handle
    pub handle: TextureHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture for AtlasTexture {
    fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    fn id(&self) -> TextureHandle {
        self.handle
    }
}

/// Uploads decoded RGBA sprite sheets to the GPU
pub trait TextureUploader {
    /// Upload an RGBA8 image and return the resulting texture
    fn upload_rgba_image(&mut self, image: &ImageData) -> RenderResult<AtlasTexture>;
}

/// One corner of a textured quad
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct QuadVertex {
    /// Local position in pixels
    pub position: [f32; 2],
    /// Normalized texture coordinate
    pub tex_coord: [f32; 2],
}

/// Shape/shader layer consumed by fonts and text groups
///
/// Quads are created once per glyph and drawn many times; a draw only
/// supplies the final model-view-projection matrix.
pub trait ShapeBackend {
    /// Compile and link a shader program
    fn create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle>;

    /// Release a shader program
    fn release_program(&mut self, program: ProgramHandle);

    /// Create a quad textured with `texture`
    ///
    /// Vertices are ordered bottom-left, bottom-right, top-left, top-right
    /// (triangle-strip winding).
    fn create_quad(
        &mut self,
        program: ProgramHandle,
        texture: TextureHandle,
        vertices: &[QuadVertex; 4],
    ) -> RenderResult<QuadHandle>;

    /// Release a quad
    fn release_quad(&mut self, quad: QuadHandle);

    /// Release a texture
    fn release_texture(&mut self, texture: TextureHandle);

    /// Draw a quad with the given model-view-projection matrix
    fn draw_quad(&mut self, quad: QuadHandle, mvp: &Mat4) -> RenderResult<()>;
}
