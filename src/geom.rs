// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry types
//!
//! Canonical glyph coordinates are in pixels, y-up, with the left end of the
//! first line's baseline at the origin. Transformed coordinates lie in the
//! XY-plane at the target position.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector or point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2(self.0 * rhs, self.1 * rhs)
    }
}

/// A 3D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3(pub f32, pub f32, pub f32);

/// An axis-aligned rectangle, stored as minimum and maximum corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Construct from a minimum corner and a (non-negative) size
    #[inline]
    pub fn with_size(min: Vec2, size: Vec2) -> Rect {
        Rect {
            min,
            max: min + size,
        }
    }

    /// Size of the rectangle
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Scale each axis about the rectangle's own center
    pub fn scaled_about_center(self, factors: Vec2) -> Rect {
        let center = (self.min + self.max) * 0.5;
        let half = self.max - center;
        let half = Vec2(half.0 * factors.0, half.1 * factors.1);
        Rect {
            min: center - half,
            max: center + half,
        }
    }
}

/// Four coplanar corners of a glyph rectangle in the XY-plane (z = 0)
///
/// Corner order is minimum-x/minimum-y, maximum-x/minimum-y,
/// maximum-x/maximum-y, minimum-x/maximum-y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quad(pub [Vec3; 4]);

impl Quad {
    /// Build a quad covering `rect` at z = 0
    pub fn from_rect(rect: Rect) -> Quad {
        let (min, max) = (rect.min, rect.max);
        Quad([
            Vec3(min.0, min.1, 0.0),
            Vec3(max.0, min.1, 0.0),
            Vec3(max.0, max.1, 0.0),
            Vec3(min.0, max.1, 0.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_scaled_about_center() {
        let rect = Rect::with_size(Vec2(1.0, 2.0), Vec2(4.0, 8.0));
        let scaled = rect.scaled_about_center(Vec2(2.0, 0.5));
        assert_eq!(scaled.min, Vec2(-1.0, 4.0));
        assert_eq!(scaled.max, Vec2(7.0, 8.0));
        // Center is unchanged:
        assert_eq!((scaled.min + scaled.max) * 0.5, (rect.min + rect.max) * 0.5);
    }

    #[test]
    fn quad_winding() {
        let quad = Quad::from_rect(Rect::with_size(Vec2(0.0, 0.0), Vec2(2.0, 1.0)));
        assert_eq!(quad.0[0], Vec3(0.0, 0.0, 0.0));
        assert_eq!(quad.0[1], Vec3(2.0, 0.0, 0.0));
        assert_eq!(quad.0[2], Vec3(2.0, 1.0, 0.0));
        assert_eq!(quad.0[3], Vec3(0.0, 1.0, 0.0));
    }
}
