// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::NormalizedF32;

use crate::scalar::Scalar;
use crate::{Color, Point, Transform};

/// A gradient stop: a color pinned at a position along the gradient line.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GradientStop {
    pub(crate) position: NormalizedF32,
    pub(crate) color: Color,
}

impl GradientStop {
    /// Creates a new stop. `position` is clamped to a 0..=1 range.
    pub fn new(position: f32, color: Color) -> Self {
        GradientStop {
            position: NormalizedF32::new_clamped(position),
            color,
        }
    }
}

/// The transform carrying the gradient's unit space into device space:
/// `(0, 0)` lands on `start` and `(1, 0)` on `end`.
///
/// Composed with the CTM and inverted in `set_context`, it turns a device
/// pixel center into the gradient parameter `t` (the x coordinate).
pub fn points_to_unit(start: Point, end: Point) -> Transform {
    let d = end - start;
    Transform::from_basis(d, Point::from_xy(-d.y, d.x), start)
}

pub fn all_opaque(colors: &[Color]) -> bool {
    colors.iter().all(|c| c.is_opaque())
}

/// Applies a spread mode over the unit domain.
#[inline]
pub fn spread_unit(t: f32, mode: crate::SpreadMode) -> f32 {
    match mode {
        crate::SpreadMode::Pad => t.bound(0.0, 1.0),
        crate::SpreadMode::Repeat => t.fract1(),
        crate::SpreadMode::Reflect => reflect_unit(t),
    }
}

/// The triangle wave with period 2: 0 -> 0, 1 -> 1, 2 -> 0, ...
#[inline]
pub fn reflect_unit(t: f32) -> f32 {
    let half = t * 0.5;
    2.0 * (half - (half + 0.5).floor()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpreadMode;

    #[test]
    fn unit_transform_maps_endpoints() {
        let ts = points_to_unit(Point::from_xy(10.0, 20.0), Point::from_xy(30.0, 20.0));
        assert_eq!(ts.map_point(Point::zero()), Point::from_xy(10.0, 20.0));
        assert_eq!(ts.map_point(Point::from_xy(1.0, 0.0)), Point::from_xy(30.0, 20.0));
    }

    #[test]
    fn spread() {
        assert_eq!(spread_unit(1.5, SpreadMode::Pad), 1.0);
        assert_eq!(spread_unit(-0.5, SpreadMode::Pad), 0.0);

        assert_eq!(spread_unit(1.25, SpreadMode::Repeat), 0.25);
        assert_eq!(spread_unit(-0.25, SpreadMode::Repeat), 0.75);

        assert_eq!(spread_unit(0.25, SpreadMode::Reflect), 0.25);
        assert_eq!(spread_unit(1.75, SpreadMode::Reflect), 0.25);
        assert_eq!(spread_unit(2.25, SpreadMode::Reflect), 0.25);
        assert_eq!(spread_unit(-0.25, SpreadMode::Reflect), 0.25);
    }
}
