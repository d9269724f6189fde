// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! `ttf-parser` backed font face

use super::{FontFace, FontMetrics, GlyphId, GlyphMetrics};
use crate::conv::DPU;
use crate::Vec2;
use ttf_parser::Face;

/// A parsed font face scaled to a rendering size
///
/// Borrows an externally-owned [`ttf_parser::Face`]; this type only scales
/// its font-unit metrics to pixels.
#[derive(Copy, Clone, Debug)]
pub struct ScaledFace<'a> {
    face: &'a Face<'a>,
    dpu: DPU,
    dpem: f32,
    sdf_padding: u32,
}

impl<'a> ScaledFace<'a> {
    /// Construct, given the rendering size in pixels-per-em
    ///
    /// `sdf_padding` is the border padding baked into the glyph atlas, in
    /// texels; pass 0 when not rendering from a signed-distance field.
    pub fn new(face: &'a Face<'a>, dpem: f32, sdf_padding: u32) -> Self {
        let dpu = DPU(dpem / f32::from(face.units_per_em()));
        ScaledFace {
            face,
            dpu,
            dpem,
            sdf_padding,
        }
    }

    /// Scale: pixels per font unit
    #[inline]
    pub fn dpu(&self) -> DPU {
        self.dpu
    }
}

impl<'a> FontFace for ScaledFace<'a> {
    fn font_metrics(&self) -> FontMetrics {
        let units = i32::from(self.face.height()) + i32::from(self.face.line_gap());
        FontMetrics {
            line_advance_height: units as f32 * self.dpu.0,
        }
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        // GlyphId 0 is required to be a special glyph representing a missing
        // character (see cmap table / TrueType specification).
        GlyphId(self.face.glyph_index(c).map(|id| id.0).unwrap_or(0))
    }

    fn glyph_metrics(&self, glyph: GlyphId) -> Option<GlyphMetrics> {
        if glyph.0 == 0 || glyph.0 == u16::MAX {
            return None;
        }
        let id = glyph.into();
        let advance = self.face.glyph_hor_advance(id)?;
        let advance = Vec2(self.dpu.u16_to_px(advance), 0.0);

        // Glyphs with an advance but no outline (e.g. space) are valid:
        // they move the pen without marking pixels.
        let (bitmap_offset, size) = match self.face.glyph_bounding_box(id) {
            Some(b) => (
                Vec2(self.dpu.i16_to_px(b.x_min), self.dpu.i16_to_px(b.y_max)),
                Vec2(self.dpu.i16_to_px(b.width()), self.dpu.i16_to_px(b.height())),
            ),
            None => (Vec2::ZERO, Vec2::ZERO),
        };

        Some(GlyphMetrics {
            advance,
            bitmap_offset,
            size,
        })
    }

    fn kern(&self, prev: char, next: char) -> Vec2 {
        let (Some(a), Some(b)) = (self.face.glyph_index(prev), self.face.glyph_index(next))
        else {
            return Vec2::ZERO;
        };
        let Some(kern) = self.face.tables().kern else {
            return Vec2::ZERO;
        };
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(a, b) {
                return Vec2(self.dpu.i16_to_px(value), 0.0);
            }
        }
        Vec2::ZERO
    }

    fn size_in_pixels(&self) -> f32 {
        self.dpem
    }

    fn sdf_padding(&self) -> u32 {
        self.sdf_padding
    }
}
