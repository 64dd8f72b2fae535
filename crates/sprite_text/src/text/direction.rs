//! Render direction of a font

use serde::{Deserialize, Serialize};

/// Axis along which consecutive glyphs are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderDirection {
    /// Advance along +X
    #[default]
    LeftToRight,
    /// Advance along -Y (downward on a y-up screen)
    TopToBottom,
}

impl RenderDirection {
    /// Whether glyph advances accumulate vertically
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom)
    }
}
