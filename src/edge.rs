// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::floating_point::round_to_i32;
use crate::Point;

/// A monotone-in-y line segment, prepared for scan conversion.
///
/// Stores the line as `x = m*y + b`, so intersecting a scanline is a
/// single multiply-add. `top`/`bottom` are the rounded y extent; the edge
/// participates in scanlines `top <= y < bottom`. `winding` is `+1` for an
/// upward segment (`p0.y > p1.y`) and `-1` for a downward one.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub m: f32,
    pub b: f32,
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
    pub winding: i32,
}

impl Edge {
    /// Builds an edge from two points.
    ///
    /// Returns `None` for segments that never cross a scanline center band:
    /// horizontal segments and segments whose y extent rounds to nothing.
    pub fn from_points(p0: Point, p1: Point) -> Option<Edge> {
        Edge::from_points_with_winding(p0, p1, winding_of(p0, p1))
    }

    /// Builds an edge keeping a winding computed before clipping mangled
    /// the endpoints.
    pub fn from_points_with_winding(p0: Point, p1: Point, winding: i32) -> Option<Edge> {
        let top = round_to_i32(p0.y.min(p1.y));
        let bottom = round_to_i32(p0.y.max(p1.y));
        if top >= bottom {
            return None;
        }

        let (m, b) = line_m_and_b(p0, p1);
        Some(Edge {
            m,
            b,
            top,
            bottom,
            left: round_to_i32(p0.x.min(p1.x)),
            right: round_to_i32(p0.x.max(p1.x)),
            winding,
        })
    }

    /// Checks that the edge spans scanline `y`.
    #[inline]
    pub fn is_valid_at(&self, y: i32) -> bool {
        self.top <= y && y < self.bottom
    }

    /// Returns the x coordinate where the edge crosses the horizontal
    /// line at `y`.
    #[inline]
    pub fn x_at(&self, y: f32) -> f32 {
        self.m * y + self.b
    }
}

/// `+1` when the segment points up, `-1` down, `0` for horizontal.
#[inline]
pub fn winding_of(p0: Point, p1: Point) -> i32 {
    if p0.y > p1.y {
        1
    } else if p0.y < p1.y {
        -1
    } else {
        0
    }
}

/// Solves `x = m*y + b` through two points.
#[inline]
pub fn line_m_and_b(p0: Point, p1: Point) -> (f32, f32) {
    let m = (p1.x - p0.x) / (p1.y - p0.y);
    let b = p0.x - m * p0.y;
    (m, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_is_rejected() {
        let e = Edge::from_points(Point::from_xy(0.0, 5.0), Point::from_xy(10.0, 5.0));
        assert!(e.is_none());
    }

    #[test]
    fn sub_scanline_is_rejected() {
        let e = Edge::from_points(Point::from_xy(0.0, 5.1), Point::from_xy(10.0, 5.3));
        assert!(e.is_none());
    }

    #[test]
    fn winding_sign() {
        let down = Edge::from_points(Point::from_xy(0.0, 0.0), Point::from_xy(0.0, 10.0)).unwrap();
        assert_eq!(down.winding, -1);

        let up = Edge::from_points(Point::from_xy(0.0, 10.0), Point::from_xy(0.0, 0.0)).unwrap();
        assert_eq!(up.winding, 1);
    }

    #[test]
    fn x_interpolation() {
        // From (0, 0) to (10, 10): x == y.
        let e = Edge::from_points(Point::from_xy(0.0, 0.0), Point::from_xy(10.0, 10.0)).unwrap();
        assert_eq!(e.x_at(3.5), 3.5);
        assert_eq!(e.top, 0);
        assert_eq!(e.bottom, 10);
        assert!(e.is_valid_at(0));
        assert!(e.is_valid_at(9));
        assert!(!e.is_valid_at(10));
    }
}
