//! Sprite-sheet fonts
//!
//! A [`Font`] owns the atlas texture, the glyph program and one quad per
//! glyph, all created up front so that composing text never touches the GPU.

use std::sync::Arc;
use super::{FontConfig, FontError, FontResult, GlyphQuad, GlyphTable, RenderDirection};
use crate::assets::ImageData;
use crate::render::{
    PixelRect, ProgramHandle, ShaderSource, ShapeBackend, Texture, TextureHandle, TextureUploader,
};

/// A font rendering text from a glyph sprite sheet
#[derive(Debug)]
pub struct Font {
    config: FontConfig,
    texture: TextureHandle,
    program: ProgramHandle,
    quads: Vec<Arc<GlyphQuad>>,
    max_glyph_width: u32,
    max_glyph_height: u32,
}

/// Build a font from an uploaded sprite sheet and its configuration
///
/// Glyph rectangles must already be at the intended scale. The font takes
/// ownership of `texture`; [`Font::release`] frees it along with the quads.
///
/// If the backend fails part way through, every quad created so far and the
/// program are released before the error is returned. The texture stays with
/// the caller in that case.
pub fn load_font<B, T>(backend: &mut B, texture: &T, mut config: FontConfig) -> FontResult<Font>
where
    B: ShapeBackend + ?Sized,
    T: Texture + ?Sized,
{
    config.validate()?;

    let bounds = texture.bounds();
    if bounds.width == 0 || bounds.height == 0 {
        return Err(FontError::EmptyTexture);
    }
    check_atlas_fit(&config.glyphs, bounds)?;

    let (max_glyph_width, max_glyph_height) = config.glyphs.max_bounds();
    let program = backend.create_program(&ShaderSource::glyph_quad())?;

    let glyph_count = config.glyphs.len();
    let mut quads = Vec::with_capacity(glyph_count);
    for glyph in config.glyphs.iter_mut() {
        glyph.bind_to_atlas(bounds.width, bounds.height);

        match backend.create_quad(program, texture.id(), &glyph.quad_vertices()) {
            Ok(handle) => quads.push(Arc::new(GlyphQuad::new(handle, glyph.width, glyph.height))),
            Err(e) => {
                log::warn!("Glyph quad {} of {} failed, unwinding font load", quads.len(), glyph_count);
                for quad in &quads {
                    backend.release_quad(quad.handle());
                }
                backend.release_program(program);
                return Err(e.into());
            }
        }
    }

    log::info!(
        "Loaded font {:?}..{:?}: {} glyphs, max bounds {}x{}, {}x{} atlas",
        config.low,
        config.high,
        quads.len(),
        max_glyph_width,
        max_glyph_height,
        bounds.width,
        bounds.height
    );

    Ok(Font {
        config,
        texture: texture.id(),
        program,
        quads,
        max_glyph_width,
        max_glyph_height,
    })
}

/// Upload a decoded sprite sheet and build a font from it
///
/// The uploaded texture is released again if font construction fails.
pub fn load_sprite_font<B>(backend: &mut B, image: &ImageData, config: FontConfig) -> FontResult<Font>
where
    B: ShapeBackend + TextureUploader + ?Sized,
{
    let texture = backend.upload_rgba_image(image)?;
    load_font(backend, &texture, config).map_err(|e| {
        backend.release_texture(texture.handle);
        e
    })
}

fn check_atlas_fit(glyphs: &GlyphTable, bounds: PixelRect) -> FontResult<()> {
    let atlas = PixelRect::new(0, 0, bounds.width, bounds.height);
    for (index, glyph) in glyphs.iter().enumerate() {
        let rect = glyph.atlas_rect();
        if !atlas.contains(&rect) {
            return Err(FontError::GlyphOutsideAtlas {
                index,
                rect,
                atlas_width: bounds.width,
                atlas_height: bounds.height,
            });
        }
    }
    Ok(())
}

impl Font {
    /// Rendering orientation
    pub const fn direction(&self) -> RenderDirection {
        self.config.direction
    }

    /// Lower rune bound
    pub const fn low(&self) -> char {
        self.config.low
    }

    /// Upper rune bound (exclusive)
    pub const fn high(&self) -> char {
        self.config.high
    }

    /// Glyph descriptors, with texture coordinates resolved
    pub const fn glyphs(&self) -> &GlyphTable {
        &self.config.glyphs
    }

    /// Configuration the font was built from
    pub const fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Atlas texture handle
    pub const fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Shader program shared by all glyph quads
    pub const fn program(&self) -> ProgramHandle {
        self.program
    }

    pub(crate) fn quad(&self, index: usize) -> Option<&Arc<GlyphQuad>> {
        self.quads.get(index)
    }

    /// Largest width and height of any glyph
    ///
    /// This is the largest bounding box a single glyph can have.
    pub const fn glyph_bounds(&self) -> (u32, u32) {
        (self.max_glyph_width, self.max_glyph_height)
    }

    /// Pixel width and height of `text`
    ///
    /// The axis along the render direction is the sum of advances; the other
    /// axis is the largest glyph extent. Runes the font does not cover count
    /// as the largest glyph bound on the advance axis.
    pub fn metrics(&self, text: &str) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }

        let (gw, gh) = self.glyph_bounds();
        match self.config.direction {
            RenderDirection::TopToBottom => (gw, self.advance_size(text)),
            RenderDirection::LeftToRight => (self.advance_size(text), gh),
        }
    }

    /// Sum of advances over the runes of a single line
    ///
    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn advance_size(&self, line: &str) -> u32 {
        line.chars()
            .map(|rune| self.advance_of(rune))
            .fold(0u32, u32::saturating_add)
    }

    /// Advance for one rune, falling back to the glyph bounds for unknown runes
    pub fn advance_of(&self, rune: char) -> u32 {
        self.config
            .glyph(rune)
            .map_or_else(|| self.fallback_advance(), |(_, glyph)| glyph.advance)
    }

    const fn fallback_advance(&self) -> u32 {
        if self.config.direction.is_vertical() {
            self.max_glyph_height
        } else {
            self.max_glyph_width
        }
    }

    /// Free the glyph quads, the program and the atlas texture
    ///
    /// Text groups composed from this font must not be drawn afterwards.
    pub fn release<B: ShapeBackend + ?Sized>(self, backend: &mut B) {
        let shared_quads = self.quads.iter().filter(|quad| Arc::strong_count(quad) > 1).count();
        if shared_quads > 0 {
            log::warn!("Releasing font while {} glyph quads are still referenced by text groups", shared_quads);
        }

        for quad in &self.quads {
            backend.release_quad(quad.handle());
        }
        backend.release_program(self.program);
        backend.release_texture(self.texture);

        log::debug!("Released font {:?}..{:?} ({} quads)", self.config.low, self.config.high, self.quads.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::render::{AtlasTexture, HeadlessBackend, RenderError};
    use crate::text::{GlyphDescriptor, GridLayout};

    fn atlas(backend: &mut HeadlessBackend, width: u32, height: u32) -> AtlasTexture {
        backend
            .upload_rgba_image(&ImageData::solid_color(width, height, [255; 4]))
            .unwrap()
    }

    /// 'A' = 5 wide / advance 5, 'B' = 7 wide / advance 7, 'C' = 3x12 / advance 4
    fn abc_config(direction: RenderDirection) -> FontConfig {
        let glyphs = GlyphTable::new(vec![
            GlyphDescriptor::new(0, 0, 5, 10, 5),
            GlyphDescriptor::new(5, 0, 7, 10, 7),
            GlyphDescriptor::new(12, 0, 3, 12, 4),
        ]);
        FontConfig::new('A', 'D', direction, glyphs).unwrap()
    }

    #[test]
    fn test_glyph_bounds_are_maxima() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);
        let font = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap();
        assert_eq!(font.glyph_bounds(), (7, 12));
    }

    #[test]
    fn test_larger_glyph_grows_bounds() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);

        let mut config = abc_config(RenderDirection::LeftToRight);
        let mut glyphs: Vec<_> = config.glyphs.iter().cloned().collect();
        glyphs.push(GlyphDescriptor::new(20, 0, 9, 20, 9));
        config.high = 'E';
        config.glyphs = GlyphTable::new(glyphs);

        let font = load_font(&mut backend, &texture, config).unwrap();
        assert_eq!(font.glyph_bounds(), (9, 20));
    }

    #[test]
    fn test_empty_metrics() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);
        for direction in [RenderDirection::LeftToRight, RenderDirection::TopToBottom] {
            let font = load_font(&mut backend, &texture, abc_config(direction)).unwrap();
            assert_eq!(font.metrics(""), (0, 0));
        }
    }

    #[test]
    fn test_metrics_sum_advances() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);

        let ltr = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap();
        assert_eq!(ltr.advance_size("AB"), 12);
        assert_eq!(ltr.metrics("ABCA"), (21, 12));

        let ttb = load_font(&mut backend, &texture, abc_config(RenderDirection::TopToBottom)).unwrap();
        assert_eq!(ttb.metrics("ABCA"), (7, 21));
    }

    #[test]
    fn test_huge_advances_saturate() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 16, 16);
        let glyphs = GlyphTable::new(vec![GlyphDescriptor::new(0, 0, 8, 8, 3_000_000_000)]);
        let config = FontConfig::new('A', 'B', RenderDirection::LeftToRight, glyphs).unwrap();
        let font = load_font(&mut backend, &texture, config).unwrap();

        assert_eq!(font.advance_size("A"), 3_000_000_000);
        assert_eq!(font.metrics("AA"), (u32::MAX, 8));
        assert_eq!(font.print("AA").unwrap().size(), (u32::MAX, 8));
    }

    #[test]
    fn test_unknown_runes_use_fallback_axis() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);

        // 'D' is one past the range, '@' is below it, 'é' is multi-byte
        let ltr = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap();
        assert_eq!(ltr.advance_size("D"), 7);
        assert_eq!(ltr.advance_size("@"), 7);
        assert_eq!(ltr.advance_size("AéB"), 5 + 7 + 7);

        let ttb = load_font(&mut backend, &texture, abc_config(RenderDirection::TopToBottom)).unwrap();
        assert_eq!(ttb.advance_size("A D"), 5 + 12 + 12);
    }

    #[test]
    fn test_tex_coords_resolved_at_load() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);
        let font = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap();

        let b = font.glyphs().get(1).unwrap().tex_coords();
        assert_relative_eq!(b.top_left.x, 0.05);
        assert_relative_eq!(b.top_left.y, 1.0);
        assert_relative_eq!(b.bottom_right.x, 0.12);
        assert_relative_eq!(b.bottom_right.y, 0.9);
    }

    #[test]
    fn test_one_quad_per_glyph_bound_to_texture() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 100, 100);
        let font = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap();

        assert_eq!(backend.quad_count(), 3);
        for (index, glyph) in font.glyphs().iter().enumerate() {
            let record = backend.quad(font.quad(index).unwrap().handle()).unwrap();
            assert_eq!(record.texture, texture.handle);
            assert_eq!(record.program, font.program());
            assert_eq!(record.vertices, glyph.quad_vertices());
        }
    }

    #[test]
    fn test_deterministic_construction() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 64, 32);
        let grid = GridLayout { cell_width: 8, cell_height: 8, columns: 8, advance: 8 };
        let config = FontConfig::from_grid(' ', '@', RenderDirection::LeftToRight, &grid).unwrap();

        let first = load_font(&mut backend, &texture, config.clone()).unwrap();
        let second = load_font(&mut backend, &texture, config).unwrap();

        assert_eq!(first.glyph_bounds(), second.glyph_bounds());
        assert_eq!(first.glyphs(), second.glyphs());
        for (a, b) in first.glyphs().iter().zip(second.glyphs()) {
            assert_eq!(a.tex_coords(), b.tex_coords());
        }
    }

    #[test]
    fn test_rejects_glyph_outside_atlas() {
        let mut backend = HeadlessBackend::new();
        let texture = atlas(&mut backend, 14, 12);
        let err = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap_err();

        assert!(matches!(err, FontError::GlyphOutsideAtlas { index: 2, .. }));
        assert_eq!(backend.quad_count(), 0);
        assert_eq!(backend.program_count(), 0);
    }

    #[test]
    fn test_rejects_empty_texture() {
        let mut backend = HeadlessBackend::new();
        let texture = AtlasTexture { handle: TextureHandle(1), width: 0, height: 16 };
        assert!(matches!(
            load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)),
            Err(FontError::EmptyTexture)
        ));
    }

    #[test]
    fn test_backend_failure_unwinds() {
        let mut backend = HeadlessBackend::new().with_quad_limit(2);
        let texture = atlas(&mut backend, 100, 100);
        let err = load_font(&mut backend, &texture, abc_config(RenderDirection::LeftToRight)).unwrap_err();

        assert!(matches!(err, FontError::Render(RenderError::QuadCreation(_))));
        assert_eq!(backend.quad_count(), 0);
        assert_eq!(backend.program_count(), 0);
        assert_eq!(backend.texture_count(), 1);
    }

    #[test]
    fn test_release_frees_everything() {
        let mut backend = HeadlessBackend::new();
        let image = ImageData::solid_color(100, 100, [255; 4]);
        let font = load_sprite_font(&mut backend, &image, abc_config(RenderDirection::LeftToRight)).unwrap();

        assert_eq!(backend.texture_count(), 1);
        assert_eq!(backend.quad_count(), 3);

        font.release(&mut backend);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_sprite_font_failure_releases_texture() {
        let mut backend = HeadlessBackend::new();
        let image = ImageData::solid_color(8, 8, [255; 4]);
        assert!(load_sprite_font(&mut backend, &image, abc_config(RenderDirection::LeftToRight)).is_err());
        assert!(backend.is_empty());
    }
}
