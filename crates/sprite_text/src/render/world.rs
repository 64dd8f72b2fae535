//! Screen-space world for 2D overlays
//!
//! Origin bottom-left, +Y up, one unit per pixel.

use crate::foundation::math::Mat4;

/// Orthographic viewport that text groups attach to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    width: u32,
    height: u32,
    projection: Mat4,
}

impl World {
    /// Create a world covering a `width` x `height` pixel viewport
    pub fn new(width: u32, height: u32) -> Self {
        let projection = Mat4::new_orthographic(0.0, width as f32, 0.0, height as f32, -1.0, 1.0);
        Self { width, height, projection }
    }

    /// Viewport size in pixels
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Projection matrix mapping pixels to clip space
    pub const fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Rebuild the projection after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_corners_map_to_clip_space() {
        let world = World::new(800, 600);
        let bottom_left = world.projection().transform_point(&Point3::new(0.0, 0.0, 0.0));
        let top_right = world.projection().transform_point(&Point3::new(800.0, 600.0, 0.0));

        assert_relative_eq!(bottom_left.x, -1.0);
        assert_relative_eq!(bottom_left.y, -1.0);
        assert_relative_eq!(top_right.x, 1.0);
        assert_relative_eq!(top_right.y, 1.0);
    }

    #[test]
    fn test_resize() {
        let mut world = World::new(800, 600);
        world.resize(1024, 768);
        assert_eq!(world.size(), (1024, 768));
        assert_eq!(world, World::new(1024, 768));
    }
}
