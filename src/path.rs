// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, Rect, Transform};

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Cubic,
    Close,
}

/// A Bezier path.
///
/// Can be created via [`PathBuilder`].
///
/// # Guarantees
///
/// - Has precomputed control-point bounds.
/// - Has at least one verb.
/// - Each contour starts with a Move.
///
/// [`PathBuilder`]: struct.PathBuilder.html
#[derive(Clone, PartialEq)]
pub struct Path {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) bounds: Rect,
}

impl Path {
    /// Returns the number of verbs in the path.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Returns if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Returns the bounds of the path's control points.
    ///
    /// A curve never escapes the convex hull of its control points,
    /// so this is a conservative cover of the filled region.
    /// The value is precomputed.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns a transformed copy of the path.
    ///
    /// Bounds are recomputed from the mapped control points.
    pub fn transform(&self, ts: Transform) -> Path {
        let mut points = self.points.clone();
        ts.map_points(&mut points);
        let bounds = bounds_from_points(&points);
        Path {
            verbs: self.verbs.clone(),
            points,
            bounds,
        }
    }

    /// Returns an iterator over the path's segments.
    ///
    /// Each segment carries its end points only; the previous endpoint is
    /// available via [`PathSegmentsIter::last_point`].
    ///
    /// [`PathSegmentsIter::last_point`]: struct.PathSegmentsIter.html#method.last_point
    pub fn segments(&self) -> PathSegmentsIter {
        PathSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            last_point: Point::zero(),
            contour_start: Point::zero(),
        }
    }
}

impl std::fmt::Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("verbs", &self.verbs.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

pub(crate) fn bounds_from_points(points: &[Point]) -> Rect {
    let mut points = points.iter();
    let first = match points.next() {
        Some(p) => *p,
        None => return Rect::default(),
    };

    let mut bounds = Rect::from_ltrb(first.x, first.y, first.x, first.y);
    for p in points {
        bounds.extend_to(*p);
    }

    bounds
}

/// A path segment.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// A path segments iterator.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    last_point: Point,
    contour_start: Point,
}

impl<'a> PathSegmentsIter<'a> {
    /// The endpoint of the previously returned segment.
    pub fn last_point(&self) -> Point {
        self.last_point
    }

    /// The first point of the contour the iterator is currently in.
    pub fn contour_start(&self) -> Point {
        self.contour_start
    }
}

impl<'a> Iterator for PathSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let verb = *self.path.verbs.get(self.verb_index)?;
        self.verb_index += 1;

        match verb {
            PathVerb::Move => {
                let p = self.path.points[self.points_index];
                self.points_index += 1;
                self.last_point = p;
                self.contour_start = p;
                Some(PathSegment::MoveTo(p))
            }
            PathVerb::Line => {
                let p = self.path.points[self.points_index];
                self.points_index += 1;
                self.last_point = p;
                Some(PathSegment::LineTo(p))
            }
            PathVerb::Quad => {
                let p1 = self.path.points[self.points_index + 0];
                let p2 = self.path.points[self.points_index + 1];
                self.points_index += 2;
                self.last_point = p2;
                Some(PathSegment::QuadTo(p1, p2))
            }
            PathVerb::Cubic => {
                let p1 = self.path.points[self.points_index + 0];
                let p2 = self.path.points[self.points_index + 1];
                let p3 = self.path.points[self.points_index + 2];
                self.points_index += 3;
                self.last_point = p3;
                Some(PathSegment::CubicTo(p1, p2, p3))
            }
            PathVerb::Close => {
                self.last_point = self.contour_start;
                Some(PathSegment::Close)
            }
        }
    }
}
