// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout output

use crate::conv::to_u32;
use crate::fonts::GlyphId;
use crate::{Quad, Rect, Vec2};
use thiserror::Error;

// Glyph counts are bounded so that indices fit `u32` (GPU index buffers);
// see crate::conv.
const MAX_GLYPHS: usize = u32::MAX as usize;

/// Glyph storage limit exceeded
///
/// Indicates a caller or configuration invariant violation, not a
/// recoverable per-glyph condition; treat as fatal for the layout request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Error)]
#[error("layout glyph capacity exceeded")]
pub struct CapacityError;

/// A positioned glyph in final coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Glyph identifier in the font
    pub glyph: GlyphId,
    /// Render quad; equals `tight_bounds` expanded for SDF padding
    pub quad: Quad,
    /// True glyph extent, before SDF padding expansion (e.g. for
    /// hit-testing)
    pub tight_bounds: Rect,
    /// Scaled offset from the pen position to the glyph's bottom-left
    pub offset: Vec2,
}

/// An ordered, append-only collection of laid-out glyphs
///
/// Glyphs appear in line order and, within a line, in the emitting shaper's
/// left-to-right order. The output is consumed opaquely by a rendering
/// collaborator.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    glyphs: Vec<Glyph>,
    line_advance_height: f32,
}

impl Layout {
    /// Pre-allocate space for `additional` more glyphs
    pub fn reserve(&mut self, additional: usize) {
        self.glyphs.reserve(additional);
    }

    /// Append a glyph
    ///
    /// Fails if the glyph capacity is exceeded; callers must treat this as
    /// fatal for the request.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Result<(), CapacityError> {
        if self.glyphs.len() >= MAX_GLYPHS {
            return Err(CapacityError);
        }
        self.glyphs.push(glyph);
        Ok(())
    }

    /// Laid-out glyphs, in insertion order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of glyphs as `u32` (always representable; see `add_glyph`)
    pub fn num_glyphs(&self) -> u32 {
        to_u32(self.glyphs.len())
    }

    /// True if no glyphs were produced
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Scaled distance between successive baselines
    pub fn line_advance_height(&self) -> f32 {
        self.line_advance_height
    }

    pub(crate) fn set_line_advance_height(&mut self, height: f32) {
        self.line_advance_height = height;
    }
}
