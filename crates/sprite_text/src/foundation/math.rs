//! Math utilities and types
//!
//! Text is laid out in a 2D, y-up plane. Quads are transformed with 4x4
//! matrices so they can be handed straight to a shader as an MVP.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Planar transform: translation, rotation about a pivot, uniform-per-axis scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Translation in world units
    pub position: Vec2,

    /// Rotation in radians, counter-clockwise
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a transform with only a position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    ///
    /// Rotation and scale are applied around `pivot` (world space), then the
    /// local geometry is moved to `position`.
    pub fn to_matrix(&self, pivot: Vec2) -> Mat4 {
        let pivot3 = Vec3::new(pivot.x, pivot.y, 0.0);
        Mat4::new_translation(&pivot3)
            * Mat4::new_rotation(Vec3::new(0.0, 0.0, self.rotation))
            * Mat4::new_nonuniform_scaling(&Vec3::new(self.scale.x, self.scale.y, 1.0))
            * Mat4::new_translation(&-pivot3)
            * Mat4::new_translation(&Vec3::new(self.position.x, self.position.y, 0.0))
    }
}
