// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text measurement

use crate::fonts::FontFace;
use crate::{DecodeChars, LayoutOptions, Vec2};
use smallvec::SmallVec;

/// The pixel size that a text actually occupies
///
/// This measures real glyph extents, as opposed to the size the text would
/// occupy if every line had a maximally-tall glyph for the font.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextSize {
    /// Width of each line, parallel to the input lines
    pub line_widths_in_pixels: SmallVec<[f32; 1]>,
    /// Maximum line width × height from line count and spacing
    pub rect_size_in_pixels: Vec2,
    /// Extent of the first line's tallest glyph above its baseline
    pub first_line_above_baseline: f32,
    /// Occupied height: first line's ascent + last line's descent + spacing
    pub text_height_in_pixels: f32,
    /// Copy of the font's line-advance height
    pub line_height_in_pixels: f32,
}

// Returns the width in pixels of a single line of text. Returns 0 if there
// are any UTF-8 encoding errors in the line.
fn compute_line_width<F: FontFace>(face: &F, line: &[u8]) -> f32 {
    // x_min tracks the X coordinate of the left edge of the current glyph
    // being processed, and x_max is the right edge. Both are needed because
    // x_min is incremented by the glyph's advance value, which determines
    // the left edge of the next glyph, but the text width ends at the
    // previous x_max.
    let mut x_min = 0.0f32;
    let mut x_max = 0.0f32;
    let mut prev = None;
    let mut chars = DecodeChars::new(line);
    for c in chars.by_ref() {
        let glyph = face.glyph_index(c);
        match face.glyph_metrics(glyph) {
            None => {
                // Zero-width glyph.
                x_min = x_max;
            }
            Some(metrics) => {
                if let Some(prev) = prev {
                    x_min += face.kern(prev, c).0;
                }
                x_max = x_min + metrics.bitmap_offset.0 + metrics.size.0;
                x_min += metrics.advance.0;
            }
        }
        prev = Some(c);
    }
    if chars.malformed() {
        0.0
    } else {
        x_max
    }
}

/// Measure `lines` as rendered with `face`
///
/// Panics if `lines` is empty.
pub fn compute_text_size<F: FontFace, L: AsRef<[u8]>>(
    face: &F,
    options: &LayoutOptions,
    lines: &[L],
) -> TextSize {
    let num_lines = lines.len();
    assert!(num_lines > 0, "compute_text_size: lines must not be empty");

    let font_metrics = face.font_metrics();
    let mut text_size = TextSize {
        line_height_in_pixels: font_metrics.line_advance_height,
        ..Default::default()
    };

    // How far above the first line's baseline its tallest glyph extends.
    let mut first_line_above_baseline = 0.0f32;
    for c in DecodeChars::new(lines.first().unwrap().as_ref()) {
        if let Some(metrics) = face.glyph_metrics(face.glyph_index(c)) {
            first_line_above_baseline = first_line_above_baseline.max(metrics.bitmap_offset.1);
        }
    }
    text_size.first_line_above_baseline = first_line_above_baseline;

    // How far below the last line's baseline its lowest glyph extends.
    let mut last_line_below_baseline = 0.0f32;
    for c in DecodeChars::new(lines.last().unwrap().as_ref()) {
        if let Some(metrics) = face.glyph_metrics(face.glyph_index(c)) {
            last_line_below_baseline =
                last_line_below_baseline.max(metrics.size.1 - metrics.bitmap_offset.1);
        }
    }

    // All lines but the first account for one spacing step each; the first
    // contributes its tallest glyph, the last its deepest descender (0 for
    // lines without descenders).
    let spacing = options.line_spacing * (num_lines - 1) as f32;
    text_size.text_height_in_pixels = first_line_above_baseline
        + last_line_below_baseline
        + font_metrics.line_advance_height * spacing;

    // Height depends only on the number of lines and line spacing.
    let height = (1.0 + spacing) * face.size_in_pixels();

    // Width requires per-line measurement to handle horizontal alignment.
    let mut width = 0.0f32;
    text_size.line_widths_in_pixels.reserve(num_lines);
    for line in lines {
        let line_width = compute_line_width(face, line.as_ref());
        text_size.line_widths_in_pixels.push(line_width);
        width = width.max(line_width);
    }
    text_size.rect_size_in_pixels = Vec2(width, height);

    text_size
}
