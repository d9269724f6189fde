// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph layout engine
//!
//! [`lay_out_text`] places glyphs for pre-split, pre-measured lines. Each
//! line takes one of two paths: a fast per-character advance/kerning walk,
//! or complex shaping (ligatures, combining marks, bidirectional runs) when
//! a [`ShapeEngine`] is supplied and the line contains characters outside
//! the fast Unicode ranges. Both paths emit into the same coordinate space,
//! so mixed-script texts lay out consistently.

use crate::classify::is_fast_text;
use crate::fonts::{FontFace, GlyphId, GlyphMetrics};
use crate::{
    compute_text_size, compute_transform_data, CapacityError, DecodeChars, Glyph, Layout,
    LayoutOptions, Quad, Rect, TransformData, Vec2,
};

mod complex;
#[cfg(feature = "shaping")]
pub use complex::complex_line_advance;
pub use complex::{initialize_shaping, ShapeEngine};

// The fast path treats only ASCII whitespace as advance-without-glyph;
// non-ASCII whitespace (e.g. NBSP) is shaped as an ordinary glyph when the
// font provides one.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

// Adds a transformed glyph to the layout. `glyph_min` is the glyph's
// minimum corner in canonical coordinates. A nonzero `sdf_padding` expands
// the quad so the rendered area matches the padded texture region.
pub(crate) fn add_glyph_to_layout(
    glyph: GlyphId,
    line_index: usize,
    glyph_min: Vec2,
    metrics: &GlyphMetrics,
    transform: &TransformData,
    sdf_padding: u32,
    layout: &mut Layout,
) -> Result<(), CapacityError> {
    let glyph_size = metrics.size;
    let scale = transform.scale;

    let min = Vec2(glyph_min.0 * scale.0, glyph_min.1 * scale.1)
        + transform.line_translations[line_index];
    let mut quad_rect =
        Rect::with_size(min, Vec2(glyph_size.0 * scale.0, glyph_size.1 * scale.1));
    let tight_bounds = quad_rect;

    // Expand about the quad center to compensate for the border padding
    // baked into the rasterized bitmap.
    if sdf_padding != 0 && glyph_size.0 * glyph_size.1 != 0.0 {
        let padding = (2 * sdf_padding) as f32;
        quad_rect = quad_rect.scaled_about_center(Vec2(
            (glyph_size.0 + padding) / glyph_size.0,
            (glyph_size.1 + padding) / glyph_size.1,
        ));
    }

    let offset = Vec2(
        metrics.bitmap_offset.0 * scale.0,
        // Offset to the top of the glyph in y-up coordinates becomes an
        // offset to its bottom in the same coordinate system.
        (metrics.bitmap_offset.1 - glyph_size.1) * scale.1,
    );

    layout.add_glyph(Glyph {
        glyph,
        quad: Quad::from_rect(quad_rect),
        tight_bounds,
        offset,
    })
}

// Lays out one line of text on the fast path, walking decoded code points
// left to right. Stops silently at a decode error; other lines are
// unaffected.
fn lay_out_line_simple<F: FontFace>(
    face: &F,
    line: &[u8],
    line_index: usize,
    transform: &TransformData,
    layout: &mut Layout,
) -> Result<(), CapacityError> {
    let mut x_min = 0.0f32;
    let mut prev = None;
    for c in DecodeChars::new(line) {
        let glyph = face.glyph_index(c);
        match face.glyph_metrics(glyph) {
            None => {
                // Zero-width invalid character.
            }
            Some(metrics) if is_space(c) => {
                x_min += metrics.advance.0;
            }
            Some(metrics) => {
                let mut y_min = transform.line_y_offset_in_pixels * line_index as f32
                    + (metrics.bitmap_offset.1 - metrics.size.1);
                if let Some(prev) = prev {
                    let kern = face.kern(prev, c);
                    x_min += kern.0;
                    y_min += kern.1;
                }
                let glyph_min = Vec2(x_min + metrics.bitmap_offset.0, y_min);
                add_glyph_to_layout(
                    glyph,
                    line_index,
                    glyph_min,
                    &metrics,
                    transform,
                    face.sdf_padding(),
                    layout,
                )?;
                x_min += metrics.advance.0;
            }
        }
        prev = Some(c);
    }
    Ok(())
}

/// Lay out `lines`, producing positioned glyph quads
///
/// Lines requiring complex shaping are delegated to `engine` when one is
/// supplied; if none is (or engine initialization failed), such lines
/// degrade to no output rather than failing the request. Glyphs appear in
/// line order; within a line, in the shaper's left-to-right order.
pub fn lay_out_text<F: FontFace, L: AsRef<[u8]>>(
    face: &F,
    engine: Option<&ShapeEngine<'_>>,
    lines: &[L],
    transform: &TransformData,
) -> Result<Layout, CapacityError> {
    debug_assert_eq!(transform.line_translations.len(), lines.len());

    let mut layout = Layout::default();
    layout.set_line_advance_height(transform.scale.1 * -transform.line_y_offset_in_pixels);

    for (line_index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match engine {
            Some(engine) if !is_fast_text(line) => {
                complex::lay_out_line(face, engine, line, line_index, transform, Some(&mut layout))?;
            }
            _ => lay_out_line_simple(face, line, line_index, transform, &mut layout)?,
        }
    }
    Ok(layout)
}

/// Measure, derive transforms and lay out in one call
///
/// Equivalent to [`compute_text_size`], [`compute_transform_data`] and
/// [`lay_out_text`] in sequence.
pub fn prepare<F: FontFace, L: AsRef<[u8]>>(
    face: &F,
    engine: Option<&ShapeEngine<'_>>,
    options: &LayoutOptions,
    lines: &[L],
) -> Result<Layout, CapacityError> {
    let text_size = compute_text_size(face, options, lines);
    let transform = compute_transform_data(options, &text_size);
    lay_out_text(face, engine, lines, &transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::mock::MockFace;
    use crate::{HAlign, VAlign, Vec3};
    use smallvec::smallvec;

    fn test_face() -> MockFace {
        MockFace::new(8.0, 10.0)
            .with_glyph('A', 1, Vec2(10.0, 0.0), Vec2(1.0, 8.0), Vec2(8.0, 8.0))
            .with_glyph('B', 2, Vec2(9.0, 0.0), Vec2(1.0, 8.0), Vec2(7.0, 8.0))
            .with_glyph(' ', 3, Vec2(4.0, 0.0), Vec2::ZERO, Vec2::ZERO)
            .with_glyph('\u{a0}', 4, Vec2(4.0, 0.0), Vec2(0.0, 1.0), Vec2(4.0, 1.0))
            .with_invalid_glyph('x', 9)
    }

    // Canonical coordinates: identity scale, no translation.
    fn identity_transform(num_lines: usize) -> TransformData {
        TransformData {
            scale: Vec2(1.0, 1.0),
            line_translations: smallvec![Vec2::ZERO; num_lines],
            line_y_offset_in_pixels: -10.0,
        }
    }

    #[test]
    fn emits_one_glyph_per_resolvable_non_space_char() {
        let face = test_face();
        let layout =
            lay_out_text(&face, None, &[b"AB A"], &identity_transform(1)).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.num_glyphs(), 3);
        // Source order is preserved.
        assert_eq!(layout.glyphs()[0].glyph.0, 1);
        assert_eq!(layout.glyphs()[1].glyph.0, 2);
        assert_eq!(layout.glyphs()[2].glyph.0, 1);
    }

    #[test]
    fn pen_positions_accumulate_advances() {
        let face = test_face();
        let layout =
            lay_out_text(&face, None, &[b"AB A"], &identity_transform(1)).unwrap();
        let x_of = |i: usize| layout.glyphs()[i].tight_bounds.min.0;
        // 'A' at pen 0 + bearing 1
        assert_eq!(x_of(0), 1.0);
        // 'B' at pen 10 + bearing 1
        assert_eq!(x_of(1), 11.0);
        // Space advances the pen by 4 without emitting: pen 19 + 4, bearing 1
        assert_eq!(x_of(2), 24.0);
        // Baseline sits at y = 0: glyph bottom = bitmap_offset.y - size.y
        assert_eq!(layout.glyphs()[0].tight_bounds.min.1, 0.0);
        assert_eq!(layout.glyphs()[0].tight_bounds.max.1, 8.0);
    }

    #[test]
    fn kerning_applies_to_both_axes() {
        let face = test_face().with_kern('A', 'B', Vec2(-2.0, 1.0));
        let layout = lay_out_text(&face, None, &[b"AB"], &identity_transform(1)).unwrap();
        // 'B' pen: 10 - 2, plus bearing 1; y lifted by 1
        assert_eq!(layout.glyphs()[1].tight_bounds.min, Vec2(9.0, 1.0));
    }

    #[test]
    fn invalid_glyphs_are_skipped_without_advancing() {
        let face = test_face();
        let layout = lay_out_text(&face, None, &[b"AxA"], &identity_transform(1)).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.glyphs()[1].tight_bounds.min.0, 11.0);
    }

    #[test]
    fn decode_error_stops_only_that_line() {
        let face = test_face();
        let lines: &[&[u8]] = &[b"A\xFFB", b"B"];
        let layout = lay_out_text(&face, None, lines, &identity_transform(2)).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.glyphs()[0].glyph.0, 1);
        assert_eq!(layout.glyphs()[1].glyph.0, 2);
    }

    #[test]
    fn second_line_is_shifted_down() {
        let face = test_face();
        let lines: &[&[u8]] = &[b"A", b"A"];
        let layout = lay_out_text(&face, None, lines, &identity_transform(2)).unwrap();
        let y0 = layout.glyphs()[0].tight_bounds.min.1;
        let y1 = layout.glyphs()[1].tight_bounds.min.1;
        assert_eq!(y0, 0.0);
        assert_eq!(y1, -10.0);
        assert_eq!(layout.line_advance_height(), 10.0);
    }

    #[test]
    fn non_ascii_whitespace_is_shaped_as_a_glyph() {
        // NBSP has a glyph in this font and is not ASCII whitespace, so it
        // emits a record; a regular space does not.
        let face = test_face();
        let layout =
            lay_out_text(&face, None, &["\u{a0} ".as_bytes()], &identity_transform(1))
                .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.glyphs()[0].glyph.0, 4);
    }

    #[test]
    fn sdf_padding_expands_quad_but_not_tight_bounds() {
        let mut face = test_face();
        face.sdf_padding = 2;
        let layout = lay_out_text(&face, None, &[b"A"], &identity_transform(1)).unwrap();
        let glyph = &layout.glyphs()[0];
        // Tight bounds keep the true 8×8 extent at (1, 0).
        assert_eq!(glyph.tight_bounds.min, Vec2(1.0, 0.0));
        assert_eq!(glyph.tight_bounds.max, Vec2(9.0, 8.0));
        // Quad grows by (8 + 4)/8 = 1.5 about the center (5, 4).
        assert_eq!(glyph.quad.0[0], Vec3(-1.0, -2.0, 0.0));
        assert_eq!(glyph.quad.0[2], Vec3(11.0, 10.0, 0.0));
    }

    #[test]
    fn zero_padding_quad_equals_tight_bounds() {
        let face = test_face();
        let layout = lay_out_text(&face, None, &[b"AB"], &identity_transform(1)).unwrap();
        for glyph in layout.glyphs() {
            assert_eq!(glyph.quad, Quad::from_rect(glyph.tight_bounds));
        }
    }

    #[test]
    fn scaled_single_glyph_scenario() {
        // Single "A": rect is 9 × 8 px; fitting height 20 gives scale 2.5.
        let face = test_face();
        let options = LayoutOptions {
            horizontal_alignment: HAlign::Left,
            vertical_alignment: VAlign::Top,
            target_point: Vec2::ZERO,
            target_size: Vec2(0.0, 20.0),
            line_spacing: 1.0,
        };
        let text_size = compute_text_size(&face, &options, &[b"A"]);
        assert_eq!(text_size.rect_size_in_pixels, Vec2(9.0, 8.0));

        let transform = compute_transform_data(&options, &text_size);
        assert_eq!(transform.scale, Vec2(2.5, 2.5));

        let layout = lay_out_text(&face, None, &[b"A"], &transform).unwrap();
        assert_eq!(layout.len(), 1);
        let glyph = &layout.glyphs()[0];
        // Canonical min (1, 0) scaled by 2.5, then pushed down so the glyph
        // top (8 px above baseline, scaled) is at the target point.
        assert_eq!(glyph.tight_bounds.min, Vec2(2.5, -20.0));
        assert_eq!(glyph.tight_bounds.max, Vec2(22.5, 0.0));
        assert_eq!(glyph.offset, Vec2(2.5, 0.0));
    }

    #[test]
    fn prepare_runs_the_full_pipeline() {
        let face = test_face();
        let options = LayoutOptions {
            vertical_alignment: VAlign::Top,
            target_size: Vec2(0.0, 20.0),
            ..Default::default()
        };
        let from_steps = {
            let text_size = compute_text_size(&face, &options, &[b"AB"]);
            let transform = compute_transform_data(&options, &text_size);
            lay_out_text(&face, None, &[b"AB"], &transform).unwrap()
        };
        let from_prepare = prepare(&face, None, &options, &[b"AB"]).unwrap();
        assert_eq!(from_prepare.glyphs(), from_steps.glyphs());
        assert_eq!(
            from_prepare.line_advance_height(),
            from_steps.line_advance_height()
        );
    }
}
