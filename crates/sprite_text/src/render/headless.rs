//! In-memory backend
//!
//! Implements [`ShapeBackend`] and [`TextureUploader`] without a GPU. Every
//! resource is tracked so callers can assert on allocations, releases and
//! draw calls. Used by the test suite and the headless demo.

use std::collections::HashMap;
use slotmap::{Key, KeyData, SlotMap};
use super::{
    AtlasTexture, ProgramHandle, QuadHandle, QuadVertex, RenderError, RenderResult, ShaderSource,
    ShapeBackend, TextureHandle, TextureUploader,
};
use crate::assets::ImageData;
use crate::foundation::math::Mat4;

slotmap::new_key_type! {
    struct QuadKey;
}

/// Quad as recorded by the headless backend
#[derive(Debug, Clone, PartialEq)]
pub struct QuadRecord {
    /// Program the quad was created with
    pub program: ProgramHandle,
    /// Bound texture
    pub texture: TextureHandle,
    /// Corners, bottom-left, bottom-right, top-left, top-right
    pub vertices: [QuadVertex; 4],
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Quad that was drawn
    pub quad: QuadHandle,
    /// Matrix supplied with the draw
    pub mvp: Mat4,
}

/// Backend that keeps every resource in host memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    quads: SlotMap<QuadKey, QuadRecord>,
    textures: HashMap<TextureHandle, (u32, u32)>,
    programs: HashMap<ProgramHandle, ShaderSource>,
    next_handle: u32,
    quad_limit: Option<usize>,
    draw_calls: Vec<DrawCall>,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            next_handle: 1, // Start from 1, reserve 0 for "no resource"
            ..Default::default()
        }
    }

    /// Refuse quad creation once `limit` quads are alive
    pub fn with_quad_limit(mut self, limit: usize) -> Self {
        self.quad_limit = Some(limit);
        self
    }

    fn allocate_handle(&mut self) -> u32 {
        let handle = self.next_handle.max(1);
        self.next_handle = handle + 1;
        handle
    }

    fn quad_key(quad: QuadHandle) -> QuadKey {
        QuadKey::from(KeyData::from_ffi(quad.0))
    }

    /// Look up a live quad
    pub fn quad(&self, quad: QuadHandle) -> Option<&QuadRecord> {
        self.quads.get(Self::quad_key(quad))
    }

    /// Number of live quads
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of live programs
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Dimensions of a live texture
    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&texture).copied()
    }

    /// Draw calls recorded since the last [`take_draw_calls`](Self::take_draw_calls)
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Drain recorded draw calls
    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draw_calls)
    }

    /// Whether nothing is allocated
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.textures.is_empty() && self.programs.is_empty()
    }
}

impl TextureUploader for HeadlessBackend {
    fn upload_rgba_image(&mut self, image: &ImageData) -> RenderResult<AtlasTexture> {
        if image.width == 0 || image.height == 0 {
            return Err(RenderError::TextureUpload(format!(
                "empty image {}x{}",
                image.width, image.height
            )));
        }
        if image.data.len() != image.width as usize * image.height as usize * 4 {
            return Err(RenderError::TextureUpload(format!(
                "{} bytes do not form a {}x{} RGBA image",
                image.data.len(),
                image.width,
                image.height
            )));
        }

        let handle = TextureHandle(self.allocate_handle());
        self.textures.insert(handle, (image.width, image.height));
        log::debug!("Uploaded {}x{} texture {:?}", image.width, image.height, handle);
        if !image.is_power_of_two() {
            log::debug!("Texture {:?} is not power-of-two sized, mipmapping unavailable", handle);
        }

        Ok(AtlasTexture {
            handle,
            width: image.width,
            height: image.height,
        })
    }
}

impl ShapeBackend for HeadlessBackend {
    fn create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle> {
        if source.vertex.trim().is_empty() || source.fragment.trim().is_empty() {
            return Err(RenderError::ProgramCreation("empty shader stage".to_string()));
        }
        let handle = ProgramHandle(self.allocate_handle());
        self.programs.insert(handle, *source);
        Ok(handle)
    }

    fn release_program(&mut self, program: ProgramHandle) {
        if self.programs.remove(&program).is_none() {
            log::warn!("Release of unknown program {:?}", program);
        }
    }

    fn create_quad(
        &mut self,
        program: ProgramHandle,
        texture: TextureHandle,
        vertices: &[QuadVertex; 4],
    ) -> RenderResult<QuadHandle> {
        if let Some(limit) = self.quad_limit {
            if self.quads.len() >= limit {
                return Err(RenderError::QuadCreation(format!("quad limit of {} reached", limit)));
            }
        }
        if !self.programs.contains_key(&program) {
            return Err(RenderError::UnknownHandle { kind: "program", id: u64::from(program.0) });
        }
        if !self.textures.contains_key(&texture) {
            return Err(RenderError::UnknownHandle { kind: "texture", id: u64::from(texture.0) });
        }

        let key = self.quads.insert(QuadRecord {
            program,
            texture,
            vertices: *vertices,
        });
        Ok(QuadHandle(key.data().as_ffi()))
    }

    fn release_quad(&mut self, quad: QuadHandle) {
        if self.quads.remove(Self::quad_key(quad)).is_none() {
            log::warn!("Release of unknown quad {:?}", quad);
        }
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_none() {
            log::warn!("Release of unknown texture {:?}", texture);
        }
    }

    fn draw_quad(&mut self, quad: QuadHandle, mvp: &Mat4) -> RenderResult<()> {
        if !self.quads.contains_key(Self::quad_key(quad)) {
            return Err(RenderError::UnknownHandle { kind: "quad", id: quad.0 });
        }
        self.draw_calls.push(DrawCall { quad, mvp: *mvp });
        Ok(())
    }
}
