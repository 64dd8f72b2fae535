//! Glyph descriptors and the rune-indexed glyph table

use serde::{Deserialize, Serialize};
use crate::foundation::math::Vec2;
use crate::render::{PixelRect, QuadVertex};

/// Normalized texture coordinates of a glyph
///
/// Texture space has its origin bottom-left while atlas pixels are addressed
/// from the top-left, so Y is flipped: `top_left.y` is the larger value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoords {
    /// (tx1, ty1)
    pub top_left: Vec2,
    /// (tx2, ty2)
    pub bottom_right: Vec2,
}

impl Default for TexCoords {
    fn default() -> Self {
        Self {
            top_left: Vec2::zeros(),
            bottom_right: Vec2::zeros(),
        }
    }
}

impl TexCoords {
    /// Derive coordinates for an atlas pixel rectangle
    pub fn from_atlas(rect: PixelRect, atlas_width: u32, atlas_height: u32) -> Self {
        let tex_width = atlas_width as f32;
        let tex_height = atlas_height as f32;
        let (x, y) = (rect.x as f32, rect.y as f32);
        let (w, h) = (rect.width as f32, rect.height as f32);

        Self {
            top_left: Vec2::new(x / tex_width, 1.0 - y / tex_height),
            bottom_right: Vec2::new((x + w) / tex_width, 1.0 - (y + h) / tex_height),
        }
    }

    /// Corners in quad order: bottom-left, bottom-right, top-left, top-right
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let (tx1, ty1) = (self.top_left.x, self.top_left.y);
        let (tx2, ty2) = (self.bottom_right.x, self.bottom_right.y);
        [[tx1, ty2], [tx2, ty2], [tx1, ty1], [tx2, ty1]]
    }
}

/// Geometry and metrics of one glyph in the sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphDescriptor {
    /// Left edge in the atlas, pixels
    pub x: u32,
    /// Top edge in the atlas, pixels
    pub y: u32,
    /// Glyph width in pixels
    pub width: u32,
    /// Glyph height in pixels
    pub height: u32,
    /// Cursor advance along the font's render direction
    pub advance: u32,

    #[serde(skip)]
    tex_coords: TexCoords,
}

impl GlyphDescriptor {
    /// Create a descriptor from its atlas rectangle and advance
    pub fn new(x: u32, y: u32, width: u32, height: u32, advance: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            advance,
            tex_coords: TexCoords::default(),
        }
    }

    /// Atlas rectangle
    pub const fn atlas_rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }

    /// Texture coordinates; zero until the owning font has been loaded
    pub const fn tex_coords(&self) -> &TexCoords {
        &self.tex_coords
    }

    pub(crate) fn bind_to_atlas(&mut self, atlas_width: u32, atlas_height: u32) {
        self.tex_coords = TexCoords::from_atlas(self.atlas_rect(), atlas_width, atlas_height);
    }

    /// Quad corners in local pixels paired with texture coordinates
    pub fn quad_vertices(&self) -> [QuadVertex; 4] {
        let (w, h) = (self.width as f32, self.height as f32);
        let positions = [[0.0, 0.0], [w, 0.0], [0.0, h], [w, h]];
        let tex = self.tex_coords.corners();
        std::array::from_fn(|i| QuadVertex {
            position: positions[i],
            tex_coord: tex[i],
        })
    }
}

/// Glyph descriptors ordered by rune, starting at the font's low rune
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphTable(Vec<GlyphDescriptor>);

impl GlyphTable {
    /// Wrap descriptors in table order
    pub fn new(glyphs: Vec<GlyphDescriptor>) -> Self {
        Self(glyphs)
    }

    /// Table index for `rune`, if the table covers it
    pub fn index_of(&self, low: char, rune: char) -> Option<usize> {
        let offset = (rune as u32).checked_sub(low as u32)?;
        let index = usize::try_from(offset).ok()?;
        (index < self.0.len()).then_some(index)
    }

    /// Checked lookup of `rune` relative to `low`
    pub fn lookup(&self, low: char, rune: char) -> Option<(usize, &GlyphDescriptor)> {
        let index = self.index_of(low, rune)?;
        Some((index, &self.0[index]))
    }

    /// Descriptor at a table index
    pub fn get(&self, index: usize) -> Option<&GlyphDescriptor> {
        self.0.get(index)
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate descriptors in table order
    pub fn iter(&self) -> std::slice::Iter<'_, GlyphDescriptor> {
        self.0.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, GlyphDescriptor> {
        self.0.iter_mut()
    }

    /// Largest width and height over every glyph
    pub fn max_bounds(&self) -> (u32, u32) {
        self.0.iter().fold((0, 0), |(w, h), glyph| (w.max(glyph.width), h.max(glyph.height)))
    }
}

impl FromIterator<GlyphDescriptor> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = GlyphDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GlyphTable {
    type Item = &'a GlyphDescriptor;
    type IntoIter = std::slice::Iter<'a, GlyphDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
