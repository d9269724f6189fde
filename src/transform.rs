// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Alignment transforms

use crate::{HAlign, LayoutOptions, TextSize, VAlign, Vec2};
use smallvec::SmallVec;

/// Scale and translation taking canonical glyph coordinates to the target
///
/// Canonical glyph coordinates are in pixels, with the left end of the first
/// line's baseline at the origin. Transformed coordinates are at the correct
/// size and location in the XY-plane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformData {
    /// Per-axis scale; both components strictly positive
    pub scale: Vec2,
    /// Translation per line, parallel to the input lines
    pub line_translations: SmallVec<[Vec2; 1]>,
    /// Canonical (unscaled) y delta per successive line; negative, since
    /// lines run downward in y-up coordinates
    pub line_y_offset_in_pixels: f32,
}

// Vertical translation to align the text rectangle with the target point;
// the same value applies to every line. The text is initially positioned
// with the first line's baseline at y = 0.
fn vertical_alignment_translation(options: &LayoutOptions, text_size: &TextSize, scale: f32) -> f32 {
    // Positive offset pushes the text down.
    let offset_in_pixels = match options.vertical_alignment {
        VAlign::Top => text_size.first_line_above_baseline,
        VAlign::Centre => {
            text_size.first_line_above_baseline - 0.5 * text_size.text_height_in_pixels
        }
        VAlign::Baseline => 0.0,
        VAlign::Bottom => text_size.first_line_above_baseline - text_size.text_height_in_pixels,
    };
    options.target_point.1 - scale * offset_in_pixels
}

// Horizontal translation to align a single line with the target point. The
// line is initially positioned with its first character at x = 0.
fn horizontal_alignment_translation(
    options: &LayoutOptions,
    line_width_in_pixels: f32,
    scale: f32,
) -> f32 {
    let offset_in_pixels = match options.horizontal_alignment {
        HAlign::Left => 0.0,
        HAlign::Centre => 0.5 * line_width_in_pixels,
        HAlign::Right => line_width_in_pixels,
    };
    options.target_point.0 - scale * offset_in_pixels
}

/// Derive the transform for a measured text and a set of layout options
///
/// Panics if both components of `options.target_size` are zero.
pub fn compute_transform_data(options: &LayoutOptions, text_size: &TextSize) -> TransformData {
    let target_size = options.target_size;
    let rect_size = text_size.rect_size_in_pixels;
    assert!(
        target_size.0 != 0.0 || target_size.1 != 0.0,
        "compute_transform_data: target_size must have a nonzero component"
    );

    // If one target dimension is 0, scale both axes by the other's ratio.
    let scale = if target_size.0 == 0.0 {
        debug_assert!(target_size.1 > 0.0);
        let s = target_size.1 / rect_size.1;
        Vec2(s, s)
    } else if target_size.1 == 0.0 {
        debug_assert!(target_size.0 > 0.0);
        let s = target_size.0 / rect_size.0;
        Vec2(s, s)
    } else {
        Vec2(target_size.0 / rect_size.0, target_size.1 / rect_size.1)
    };

    // The y translation is shared by all lines; x may differ per line.
    let y_translation = vertical_alignment_translation(options, text_size, scale.1);
    let line_translations = text_size
        .line_widths_in_pixels
        .iter()
        .map(|&width| Vec2(horizontal_alignment_translation(options, width, scale.0), y_translation))
        .collect();

    TransformData {
        scale,
        line_translations,
        line_y_offset_in_pixels: -options.line_spacing * text_size.line_height_in_pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn test_size() -> TextSize {
        TextSize {
            line_widths_in_pixels: smallvec![40.0, 20.0],
            rect_size_in_pixels: Vec2(40.0, 50.0),
            first_line_above_baseline: 16.0,
            text_height_in_pixels: 44.0,
            line_height_in_pixels: 20.0,
        }
    }

    #[test]
    fn matching_target_size_is_identity_scale() {
        let options = LayoutOptions {
            target_size: Vec2(40.0, 50.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.scale, Vec2(1.0, 1.0));
    }

    #[test]
    fn zero_component_scales_uniformly() {
        let options = LayoutOptions {
            target_size: Vec2(0.0, 25.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.scale, Vec2(0.5, 0.5));

        let options = LayoutOptions {
            target_size: Vec2(80.0, 0.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.scale, Vec2(2.0, 2.0));
    }

    #[test]
    fn independent_axes() {
        let options = LayoutOptions {
            target_size: Vec2(80.0, 25.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.scale, Vec2(2.0, 0.5));
    }

    #[test]
    fn left_top_alignment() {
        let options = LayoutOptions {
            horizontal_alignment: HAlign::Left,
            vertical_alignment: VAlign::Top,
            target_size: Vec2(40.0, 50.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        // Left: x = target - 0; Top: y = target - above_baseline
        assert_eq!(data.line_translations[0], Vec2(0.0, -16.0));
        assert_eq!(data.line_translations[1], Vec2(0.0, -16.0));
    }

    #[test]
    fn per_line_horizontal_alignment() {
        let options = LayoutOptions {
            horizontal_alignment: HAlign::Right,
            vertical_alignment: VAlign::Baseline,
            target_point: Vec2(100.0, 7.0),
            target_size: Vec2(40.0, 50.0),
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.line_translations.len(), 2);
        assert_eq!(data.line_translations[0], Vec2(60.0, 7.0));
        assert_eq!(data.line_translations[1], Vec2(80.0, 7.0));

        let options = LayoutOptions {
            horizontal_alignment: HAlign::Centre,
            ..options
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.line_translations[1], Vec2(90.0, 7.0));
    }

    #[test]
    fn centre_and_bottom_vertical_offsets() {
        let base = LayoutOptions {
            target_size: Vec2(40.0, 50.0),
            ..Default::default()
        };

        let options = LayoutOptions {
            vertical_alignment: VAlign::Centre,
            ..base
        };
        let data = compute_transform_data(&options, &test_size());
        // -(16 - 22) = 6
        assert_eq!(data.line_translations[0].1, 6.0);

        let options = LayoutOptions {
            vertical_alignment: VAlign::Bottom,
            ..base
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.line_translations[0].1, 28.0);
    }

    #[test]
    fn line_y_offset_from_spacing() {
        let options = LayoutOptions {
            target_size: Vec2(40.0, 50.0),
            line_spacing: 1.5,
            ..Default::default()
        };
        let data = compute_transform_data(&options, &test_size());
        assert_eq!(data.line_y_offset_in_pixels, -30.0);
    }

    #[test]
    #[should_panic]
    fn zero_target_size_is_a_caller_bug() {
        let options = LayoutOptions {
            target_size: Vec2::ZERO,
            ..Default::default()
        };
        let _ = compute_transform_data(&options, &test_size());
    }
}
