// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font metrics interface
//!
//! Fonts are loaded and owned elsewhere; layout only queries them. The
//! [`FontFace`] trait is that seam. [`ScaledFace`] implements it over a
//! parsed [`ttf_parser::Face`] for callers who do not bring their own
//! metrics source.

use crate::Vec2;

mod face;
pub use face::ScaledFace;

/// Glyph identifier within a specific font's glyph set
///
/// `GlyphId(0)` is the "missing glyph" per the TrueType specification;
/// `0xFFFF` (and any engine-reported value at or above it) likewise denotes
/// "no glyph". Neither produces layout output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphId(pub u16);

impl From<GlyphId> for ttf_parser::GlyphId {
    fn from(id: GlyphId) -> Self {
        ttf_parser::GlyphId(id.0)
    }
}

/// Per-glyph metrics at the font's configured rendering size
///
/// All values are in pixels. A glyph with no metrics at all (see
/// [`FontFace::glyph_metrics`]) has zero width and no visual contribution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Pen advance (horizontal, vertical) after drawing the glyph
    pub advance: Vec2,
    /// Offset from the pen origin to the glyph's visual bounds: x is the
    /// left side bearing, y the extent above the baseline
    pub bitmap_offset: Vec2,
    /// Visual extent of the glyph
    pub size: Vec2,
}

/// Font-wide constant metrics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Pixel distance between the baselines of successive lines at the
    /// font's native size
    pub line_advance_height: f32,
}

/// Read-only queries against an externally-owned font
///
/// All returned distances are in pixels at the font's configured rendering
/// size. Implementations must be cheap to query; layout calls these methods
/// once or twice per character.
pub trait FontFace {
    /// Font-wide metrics
    fn font_metrics(&self) -> FontMetrics;

    /// Get the glyph for a char
    ///
    /// If the char is not covered, `GlyphId(0)` is returned (the 'missing
    /// glyph' representation).
    fn glyph_index(&self, c: char) -> GlyphId;

    /// Metrics for a glyph
    ///
    /// Returns `None` for glyphs with no usable metrics; such glyphs occupy
    /// no space and are skipped by layout.
    fn glyph_metrics(&self, glyph: GlyphId) -> Option<GlyphMetrics>;

    /// Kerning adjustment between two successive characters
    fn kern(&self, prev: char, next: char) -> Vec2;

    /// The font's configured rendering size in pixels
    ///
    /// Distinct from [`FontMetrics::line_advance_height`]: this is the size
    /// the font was scaled for, not the baseline-to-baseline distance.
    fn size_in_pixels(&self) -> f32;

    /// Signed-distance-field border padding baked into rasterized glyph
    /// bitmaps, in texels; zero when not rendering from an SDF atlas
    fn sdf_padding(&self) -> u32;
}
