// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::edge::Edge;
use crate::edge_clipper::clip_line;
use crate::path::{Path, PathSegment};
use crate::{Point, Rect};

/// Curve flattening tolerance, in pixels.
const FLATTEN_TOLERANCE: f32 = 0.25;

/// Converts polygons and paths into scan-convertible edges.
///
/// With a clip, every segment goes through the clipper; without one the
/// caller has proven the geometry fits the target and segments convert
/// directly.
pub struct EdgeBuilder {
    clip: Option<Rect>,
    edges: Vec<Edge>,
}

impl EdgeBuilder {
    pub fn new(clip: Option<Rect>) -> Self {
        EdgeBuilder {
            clip,
            edges: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Edge> {
        self.edges
    }

    pub fn push_line(&mut self, p0: Point, p1: Point) {
        match self.clip {
            Some(ref clip) => {
                self.edges.extend(clip_line(p0, p1, clip));
            }
            None => {
                if let Some(edge) = Edge::from_points(p0, p1) {
                    self.edges.push(edge);
                }
            }
        }
    }

    /// Flattens a quadratic curve into line segments.
    ///
    /// The segment count comes from the curvature error bound
    /// `|A - 2B + C| / 4`: `n = ceil(sqrt(err / tol))` halvings bring the
    /// deviation from the chord under `tol`. Every interior sample `i/n`
    /// is emitted before the exact endpoint.
    pub fn push_quad(&mut self, a: Point, b: Point, c: Point) {
        let err = (a - b.scaled(2.0) + c).scaled(0.25).length();
        let n = segment_count(err / FLATTEN_TOLERANCE);
        let dt = 1.0 / n as f32;

        let mut p0 = a;
        for i in 1..n {
            let t = i as f32 * dt;
            let p1 = quad_at(a, b, c, t);
            self.push_line(p0, p1);
            p0 = p1;
        }

        self.push_line(p0, c);
    }

    /// Flattens a cubic curve into line segments.
    ///
    /// Error bound is the per-axis maximum of the two second differences
    /// `A - 2B + C` and `B - 2C + D`; `n = ceil(sqrt(3*err / (4*tol)))`.
    pub fn push_cubic(&mut self, a: Point, b: Point, c: Point, d: Point) {
        let e0 = a - b.scaled(2.0) + c;
        let e1 = b - c.scaled(2.0) + d;
        let ex = e0.x.abs().max(e1.x.abs());
        let ey = e0.y.abs().max(e1.y.abs());
        let err = (ex * ex + ey * ey).sqrt();
        let n = segment_count(3.0 * err / (4.0 * FLATTEN_TOLERANCE));
        let dt = 1.0 / n as f32;

        let mut p0 = a;
        for i in 1..n {
            let t = i as f32 * dt;
            let p1 = cubic_at(a, b, c, d, t);
            self.push_line(p0, p1);
            p0 = p1;
        }

        self.push_line(p0, d);
    }

    /// Converts a closed polygon: consecutive points plus the wrap-around
    /// segment.
    pub fn push_polygon(&mut self, points: &[Point]) {
        if points.len() < 2 {
            return;
        }

        for i in 0..points.len() {
            let p0 = points[i];
            let p1 = points[(i + 1) % points.len()];
            self.push_line(p0, p1);
        }
    }

    /// Converts a path. Contours are closed implicitly: a segment back to
    /// the contour start is emitted at every Move boundary and at the end.
    pub fn push_path(&mut self, path: &Path) {
        let mut contour_start = Point::zero();
        let mut prev = Point::zero();
        let mut open = false;

        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    if open {
                        self.push_line(prev, contour_start);
                    }
                    contour_start = p;
                    prev = p;
                    open = false;
                }
                PathSegment::LineTo(p) => {
                    self.push_line(prev, p);
                    prev = p;
                    open = true;
                }
                PathSegment::QuadTo(p1, p2) => {
                    self.push_quad(prev, p1, p2);
                    prev = p2;
                    open = true;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    self.push_cubic(prev, p1, p2, p3);
                    prev = p3;
                    open = true;
                }
                PathSegment::Close => {
                    self.push_line(prev, contour_start);
                    prev = contour_start;
                    open = false;
                }
            }
        }

        if open {
            self.push_line(prev, contour_start);
        }
    }
}

impl std::fmt::Debug for EdgeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeBuilder")
            .field("edges", &self.edges.len())
            .finish()
    }
}

#[inline]
fn segment_count(scaled_err: f32) -> i32 {
    let n = scaled_err.sqrt().ceil() as i32;
    n.max(1)
}

fn quad_at(a: Point, b: Point, c: Point, t: f32) -> Point {
    let u = 1.0 - t;
    a.scaled(u * u) + b.scaled(2.0 * u * t) + c.scaled(t * t)
}

fn cubic_at(a: Point, b: Point, c: Point, d: Point, t: f32) -> Point {
    let u = 1.0 - t;
    a.scaled(u * u * u)
        + b.scaled(3.0 * u * u * t)
        + c.scaled(3.0 * u * t * t)
        + d.scaled(t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_quad_is_one_segment() {
        // Control point on the chord: zero error.
        let mut builder = EdgeBuilder::new(None);
        builder.push_quad(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(5.0, 5.0),
            Point::from_xy(10.0, 10.0),
        );
        assert_eq!(builder.finish().len(), 1);
    }

    #[test]
    fn curved_quad_is_subdivided() {
        let mut builder = EdgeBuilder::new(None);
        builder.push_quad(
            Point::from_xy(0.0, 50.0),
            Point::from_xy(50.0, -50.0),
            Point::from_xy(100.0, 50.0),
        );
        let edges = builder.finish();
        assert!(edges.len() > 4, "got {} edges", edges.len());

        // The polyline must land exactly on the curve endpoints.
        let first = edges.iter().map(|e| e.top).min().unwrap();
        assert!(first >= -1);
    }

    #[test]
    fn flattened_polyline_stays_in_control_bounds() {
        let mut builder = EdgeBuilder::new(None);
        builder.push_cubic(
            Point::from_xy(10.0, 50.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(90.0, 10.0),
            Point::from_xy(90.0, 50.0),
        );
        for e in builder.finish() {
            assert!(e.top >= 10 && e.bottom <= 50);
            assert!(e.left >= 10 && e.right <= 90);
        }
    }

    #[test]
    fn polygon_wraps_around() {
        let mut builder = EdgeBuilder::new(None);
        builder.push_polygon(&[
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(0.0, 10.0),
        ]);
        // Two horizontal sides are discarded; two vertical sides survive.
        assert_eq!(builder.finish().len(), 2);
    }

    #[test]
    fn unclosed_contour_is_closed() {
        let mut pb = crate::PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        let path = pb.finish().unwrap();

        let mut builder = EdgeBuilder::new(None);
        builder.push_path(&path);
        // The diagonal back to (0, 0) plus the right side.
        assert_eq!(builder.finish().len(), 2);
    }
}
