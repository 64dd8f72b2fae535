//! Text composition
//!
//! Turns a string into a [`TextGroup`] by walking a cursor along the font's
//! render direction.

use std::fmt::{self, Write};
use std::sync::Arc;
use super::{Font, FontResult, GlyphInstance, RenderDirection, TextGroup};
use crate::foundation::math::Vec2;

impl Font {
    /// Format `args` and compose the result
    ///
    /// ```no_run
    /// # fn demo(font: &sprite_text::text::Font) -> sprite_text::text::FontResult<()> {
    /// let score = font.printf(format_args!("Score: {:>6}", 1200))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn printf(&self, args: fmt::Arguments<'_>) -> FontResult<Option<TextGroup>> {
        let mut text = String::new();
        text.write_fmt(args)?;
        Ok(self.print(&text))
    }

    /// Compose `text` into positioned glyph instances
    ///
    /// Returns `None` for an empty string. Runes the font does not cover draw
    /// nothing but still move the cursor by the fallback advance, so the
    /// group's extent always matches [`Font::metrics`].
    ///
    /// LeftToRight text advances along +X. TopToBottom text advances along
    /// -Y, each glyph sitting below the previous one.
    ///
    /// The center is measured from the layout origin (where the cursor
    /// starts), not from the first drawn glyph, so a leading unknown rune
    /// still counts toward the extent.
    pub fn print(&self, text: &str) -> Option<TextGroup> {
        if text.is_empty() {
            return None;
        }

        let direction = self.direction();
        let mut group = TextGroup::new();
        let mut cursor = Vec2::zeros();

        for rune in text.chars() {
            let advance = match self.config().glyph(rune) {
                Some((index, glyph)) => {
                    if let Some(quad) = self.quad(index) {
                        group.append(GlyphInstance::new(Arc::clone(quad), cursor));
                    }
                    glyph.advance
                }
                None => {
                    log::trace!("No glyph for {:?}, advancing by fallback bound", rune);
                    self.advance_of(rune)
                }
            };

            match direction {
                RenderDirection::LeftToRight => cursor.x += advance as f32,
                RenderDirection::TopToBottom => cursor.y -= advance as f32,
            }
        }

        let (tw, th) = self.metrics(text);
        let (_, max_height) = self.glyph_bounds();
        let origin = group.origin();
        let (half_w, half_h) = (tw as f32 / 2.0, th as f32 / 2.0);
        match direction {
            RenderDirection::LeftToRight => group.set_center(origin.x + half_w, origin.y + half_h),
            RenderDirection::TopToBottom => {
                group.set_center(origin.x + half_w, origin.y + max_height as f32 - half_h);
            }
        }
        group.set_size(tw, th);

        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::assets::ImageData;
    use crate::foundation::math::Vec2;
    use crate::render::{HeadlessBackend, World};
    use crate::text::{
        load_sprite_font, Font, FontConfig, FontError, GlyphDescriptor, GlyphTable, RenderDirection,
    };

    /// 'A' advance 5, 'B' advance 7, both 10px tall
    fn ab_font(backend: &mut HeadlessBackend, direction: RenderDirection) -> Font {
        let glyphs = GlyphTable::new(vec![
            GlyphDescriptor::new(0, 0, 5, 10, 5),
            GlyphDescriptor::new(5, 0, 7, 10, 7),
        ]);
        let config = FontConfig::new('A', 'C', direction, glyphs).unwrap();
        load_sprite_font(backend, &ImageData::solid_color(32, 16, [255; 4]), config).unwrap()
    }

    #[test]
    fn test_empty_string_is_nothing_to_draw() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        assert!(font.printf(format_args!("")).unwrap().is_none());
        assert!(font.printf(format_args!("{}", "")).unwrap().is_none());
    }

    #[test]
    fn test_cursor_accumulates_advances() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.printf(format_args!("{}{}", 'A', "B")).unwrap().unwrap();

        assert_eq!(group.len(), 2);
        assert_eq!(group.instances()[0].position(), Vec2::new(0.0, 0.0));
        assert_eq!(group.instances()[1].position(), Vec2::new(5.0, 0.0));
        assert_eq!(group.size().0, font.advance_size("AB"));
        assert_eq!(group.size(), (12, 10));
    }

    #[test]
    fn test_center_is_middle_of_extent() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.print("AB").unwrap();

        assert_relative_eq!(group.center(), Vec2::new(6.0, 5.0));
        let first = group.vertices()[0];
        assert_relative_eq!(group.center().x, first.x + 6.0);
    }

    #[test]
    fn test_instances_share_font_quads() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.print("ABA").unwrap();

        let quads = group.instances();
        assert_eq!(quads[0].quad().handle(), quads[2].quad().handle());
        assert_ne!(quads[0].quad().handle(), quads[1].quad().handle());
        assert_eq!(backend.quad_count(), 2);
    }

    #[test]
    fn test_unknown_runes_skip_drawing_but_advance() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.print("A B!").unwrap();

        // ' ' and '!' are below 'A'; each advances by the max glyph width (7)
        assert_eq!(group.len(), 2);
        assert_eq!(group.instances()[1].position(), Vec2::new(12.0, 0.0));
        assert_eq!(group.size(), font.metrics("A B!"));
        assert_eq!(group.size(), (5 + 7 + 7 + 7, 10));
    }

    #[test]
    fn test_leading_unknown_rune_keeps_layout_origin() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.print("?A").unwrap();

        assert_eq!(group.len(), 1);
        assert_eq!(group.origin(), Vec2::zeros());
        assert_relative_eq!(group.vertices()[0].x, 7.0);
        // Extent is 7 + 5 measured from the origin, not from the drawn glyph
        assert_eq!(group.size(), (12, 10));
        assert_relative_eq!(group.center(), Vec2::new(6.0, 5.0));
    }

    #[test]
    fn test_only_unknown_runes_yield_empty_group() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let group = font.print("??").unwrap();
        assert!(group.is_empty());
        assert_eq!(group.size(), (14, 10));
    }

    #[test]
    fn test_top_to_bottom_advances_downward() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::TopToBottom);
        let group = font.print("AB").unwrap();

        assert_eq!(group.instances()[0].position(), Vec2::new(0.0, 0.0));
        assert_eq!(group.instances()[1].position(), Vec2::new(0.0, -5.0));
        assert_eq!(group.size(), (7, 12));
        // Measured column runs from y = 10 down to y = -2
        assert_relative_eq!(group.center(), Vec2::new(3.5, 4.0));
    }

    #[test]
    fn test_move_and_draw() {
        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        let mut group = font.print("AB").unwrap();

        group.attach_to_world(&World::new(320, 240));
        group.move_to(20.0, 20.0);
        assert_eq!(group.instances()[1].position(), Vec2::new(25.0, 20.0));
        assert_relative_eq!(group.center(), Vec2::new(26.0, 25.0));

        group.draw(&mut backend).unwrap();
        let calls = backend.take_draw_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].quad, group.instances()[0].quad().handle());
        assert_eq!(calls[1].mvp, group.instance_matrix(&group.instances()[1]));
    }

    #[test]
    fn test_format_error_propagates() {
        struct Broken;

        impl std::fmt::Display for Broken {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Err(std::fmt::Error)
            }
        }

        let mut backend = HeadlessBackend::new();
        let font = ab_font(&mut backend, RenderDirection::LeftToRight);
        assert!(matches!(font.printf(format_args!("{}", Broken)), Err(FontError::Format(_))));
    }
}
