// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use crate::Vec2;

/// Horizontal alignment of a line with respect to the target point
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum HAlign {
    /// The line starts at the target point
    #[default]
    Left,
    /// The line is centred on the target point
    Centre,
    /// The line ends at the target point
    Right,
}

/// Vertical alignment of the text rectangle with respect to the target point
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum VAlign {
    /// The top of the first line's tallest glyph is at the target point
    Top,
    /// The text rectangle is centred on the target point
    Centre,
    /// The first line's baseline is at the target point
    #[default]
    Baseline,
    /// The bottom of the text is at the target point
    Bottom,
}

/// Configuration of a layout request
///
/// `target_size` gives the size of the laid-out text in the output coordinate
/// space; a zero component means "derive this axis uniformly from the other"
/// (at most one component may be zero).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub horizontal_alignment: HAlign,
    pub vertical_alignment: VAlign,
    /// Anchor point in the output coordinate space
    pub target_point: Vec2,
    /// Target size; a zero component derives uniformly from the other
    pub target_size: Vec2,
    /// Multiplier (≥ 0) applied to the font's line-advance height between
    /// successive baselines
    pub line_spacing: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            horizontal_alignment: HAlign::Left,
            vertical_alignment: VAlign::Baseline,
            target_point: Vec2::ZERO,
            target_size: Vec2(0.0, 1.0),
            line_spacing: 1.0,
        }
    }
}
