//! Composed text: shared glyph quads and their positioned instances

use std::sync::Arc;
use crate::foundation::math::{Mat4, Point2, Transform2D, Vec2};
use crate::render::{QuadHandle, RenderResult, ShapeBackend, World};

/// GPU quad for one glyph, shared by every instance of that glyph
#[derive(Debug, PartialEq)]
pub struct GlyphQuad {
    handle: QuadHandle,
    size: Vec2,
}

impl GlyphQuad {
    pub(crate) fn new(handle: QuadHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            size: Vec2::new(width as f32, height as f32),
        }
    }

    /// Backend handle
    pub const fn handle(&self) -> QuadHandle {
        self.handle
    }

    /// Quad size in pixels
    pub const fn size(&self) -> Vec2 {
        self.size
    }
}

/// A placed glyph: shared geometry plus its own transform
#[derive(Debug, Clone)]
pub struct GlyphInstance {
    quad: Arc<GlyphQuad>,
    transform: Transform2D,
}

impl GlyphInstance {
    /// Place `quad` with its bottom-left corner at `position`
    pub fn new(quad: Arc<GlyphQuad>, position: Vec2) -> Self {
        Self {
            quad,
            transform: Transform2D::from_position(position),
        }
    }

    /// Shared quad
    pub fn quad(&self) -> &Arc<GlyphQuad> {
        &self.quad
    }

    /// Instance transform
    pub const fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Bottom-left corner position
    pub const fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Move the instance
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.transform.position = Vec2::new(x, y);
    }

    /// Corners in quad order: bottom-left, bottom-right, top-left, top-right
    ///
    /// Positions are translated only, rotation and scale are applied at draw time.
    pub fn vertices(&self) -> [Point2; 4] {
        let p = self.transform.position;
        let s = self.quad.size;
        [
            Point2::new(p.x, p.y),
            Point2::new(p.x + s.x, p.y),
            Point2::new(p.x, p.y + s.y),
            Point2::new(p.x + s.x, p.y + s.y),
        ]
    }
}

/// A string laid out as glyph instances
///
/// Owns no GPU resources; the quads it references belong to the font.
#[derive(Debug, Clone)]
pub struct TextGroup {
    instances: Vec<GlyphInstance>,
    origin: Vec2,
    center: Vec2,
    size: (u32, u32),
    projection: Option<Mat4>,
}

impl Default for TextGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGroup {
    /// Create an empty group at the origin
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            origin: Vec2::zeros(),
            center: Vec2::zeros(),
            size: (0, 0),
            projection: None,
        }
    }

    /// Append an instance; draw order follows append order
    pub fn append(&mut self, instance: GlyphInstance) {
        self.instances.push(instance);
    }

    /// Instances in string order
    pub fn instances(&self) -> &[GlyphInstance] {
        &self.instances
    }

    /// Number of placed glyphs
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no glyph was placed
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Layout origin (cursor start)
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Pivot for rotation and scale
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Set the pivot for rotation and scale
    pub fn set_center(&mut self, x: f32, y: f32) {
        self.center = Vec2::new(x, y);
    }

    /// Pixel extent as measured by the font
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// All instance corners, four per glyph, in string order
    pub fn vertices(&self) -> Vec<Point2> {
        self.instances.iter().flat_map(GlyphInstance::vertices).collect()
    }

    /// Translate the whole group so its layout origin sits at (x, y)
    pub fn move_to(&mut self, x: f32, y: f32) {
        let delta = Vec2::new(x, y) - self.origin;
        self.move_by(delta.x, delta.y);
    }

    /// Translate the whole group
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let delta = Vec2::new(dx, dy);
        self.origin += delta;
        self.center += delta;
        for instance in &mut self.instances {
            instance.transform.position += delta;
        }
    }

    /// Rotate every glyph about the group center, radians counter-clockwise
    pub fn rotate(&mut self, angle: f32) {
        for instance in &mut self.instances {
            instance.transform.rotation = angle;
        }
    }

    /// Scale every glyph about the group center
    pub fn scale(&mut self, sx: f32, sy: f32) {
        for instance in &mut self.instances {
            instance.transform.scale = Vec2::new(sx, sy);
        }
    }

    /// Use the world's projection for subsequent draws
    pub fn attach_to_world(&mut self, world: &World) {
        self.projection = Some(*world.projection());
    }

    /// Whether a world projection is attached
    pub const fn is_attached(&self) -> bool {
        self.projection.is_some()
    }

    /// Model-view-projection for one instance
    pub fn instance_matrix(&self, instance: &GlyphInstance) -> Mat4 {
        let model = instance.transform.to_matrix(self.center);
        self.projection.map_or(model, |projection| projection * model)
    }

    /// Issue one draw call per glyph
    pub fn draw<B: ShapeBackend + ?Sized>(&self, backend: &mut B) -> RenderResult<()> {
        for instance in &self.instances {
            backend.draw_quad(instance.quad.handle, &self.instance_matrix(instance))?;
        }
        log::trace!("Drew text group of {} glyphs", self.instances.len());
        Ok(())
    }
}
