// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::{bounds_from_points, Path, PathVerb};
use crate::{Point, Rect, Transform};

/// A contour direction.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PathDirection {
    CW,
    CCW,
}

/// A path builder.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    verbs: Vec<PathVerb>,
    points: Vec<Point>,
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        PathBuilder {
            verbs: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Adds a beginning of a contour.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.verbs.push(PathVerb::Move);
        self.points.push(Point::from_xy(x, y));
    }

    fn inject_move_to_if_needed(&mut self) {
        match self.verbs.last() {
            None | Some(PathVerb::Close) => self.move_to(0.0, 0.0),
            _ => {}
        }
    }

    /// Adds a line from the last point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inject_move_to_if_needed();
        self.verbs.push(PathVerb::Line);
        self.points.push(Point::from_xy(x, y));
    }

    /// Adds a quadratic curve from the last point to `(x, y)`,
    /// controlled by `(x1, y1)`.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();
        self.verbs.push(PathVerb::Quad);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x, y));
    }

    /// Adds a cubic curve from the last point to `(x, y)`,
    /// controlled by `(x1, y1)` and `(x2, y2)`.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();
        self.verbs.push(PathVerb::Cubic);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x2, y2));
        self.points.push(Point::from_xy(x, y));
    }

    /// Closes the current contour.
    ///
    /// A closed contour connects the first and the last points with a line.
    /// Filling connects them regardless; `close` only matters for reusing
    /// the contour start in subsequent segments.
    pub fn close(&mut self) {
        if !self.verbs.is_empty() && self.verbs.last() != Some(&PathVerb::Close) {
            self.verbs.push(PathVerb::Close);
        }
    }

    /// Appends a rectangle contour, starting at its top-left corner.
    pub fn push_rect(&mut self, rect: Rect, direction: PathDirection) {
        self.move_to(rect.left, rect.top);
        match direction {
            PathDirection::CW => {
                self.line_to(rect.right, rect.top);
                self.line_to(rect.right, rect.bottom);
                self.line_to(rect.left, rect.bottom);
            }
            PathDirection::CCW => {
                self.line_to(rect.left, rect.bottom);
                self.line_to(rect.right, rect.bottom);
                self.line_to(rect.right, rect.top);
            }
        }
        self.close();
    }

    /// Appends a polygon contour: `move_to(points[0])` then lines through
    /// the rest.
    pub fn push_polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }

        self.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            self.line_to(p.x, p.y);
        }
    }

    /// Appends an approximate circle contour made of four cubic curves.
    pub fn push_circle(&mut self, center: Point, radius: f32, direction: PathDirection) {
        // The classic cubic circle constant.
        let k = (4.0 * 2.0f32.sqrt() - 4.0) / 3.0;

        let mut pts = [
            Point::from_xy(1.0, 0.0),
            Point::from_xy(1.0, -k),
            Point::from_xy(k, -1.0),
            Point::from_xy(0.0, -1.0),
            Point::from_xy(-k, -1.0),
            Point::from_xy(-1.0, -k),
            Point::from_xy(-1.0, 0.0),
            Point::from_xy(-1.0, k),
            Point::from_xy(-k, 1.0),
            Point::from_xy(0.0, 1.0),
            Point::from_xy(k, 1.0),
            Point::from_xy(1.0, k),
            Point::from_xy(1.0, 0.0),
        ];

        let ts = Transform::from_translate(center.x, center.y)
            .pre_concat(&Transform::from_scale(radius, radius));
        ts.map_points(&mut pts);

        match direction {
            PathDirection::CCW => {
                self.move_to(pts[0].x, pts[0].y);
                for chunk in pts[1..].chunks_exact(3) {
                    self.cubic_to(
                        chunk[0].x, chunk[0].y,
                        chunk[1].x, chunk[1].y,
                        chunk[2].x, chunk[2].y,
                    );
                }
            }
            PathDirection::CW => {
                self.move_to(pts[12].x, pts[12].y);
                for i in (0..4).rev() {
                    self.cubic_to(
                        pts[i * 3 + 2].x, pts[i * 3 + 2].y,
                        pts[i * 3 + 1].x, pts[i * 3 + 1].y,
                        pts[i * 3 + 0].x, pts[i * 3 + 0].y,
                    );
                }
            }
        }
        self.close();
    }

    /// Returns `true` if there are no verbs.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Finishes building and returns the path.
    ///
    /// Returns `None` when the path is empty or contains no geometry.
    pub fn finish(self) -> Option<Path> {
        if self.verbs.is_empty() {
            return None;
        }

        // A Move (or a chain of them) alone has nothing to fill.
        if self.verbs.iter().all(|v| *v == PathVerb::Move) {
            return None;
        }

        let bounds = bounds_from_points(&self.points);
        Some(Path {
            verbs: self.verbs,
            points: self.points,
            bounds,
        })
    }
}
