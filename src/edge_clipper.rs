// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::edge::{line_m_and_b, winding_of, Edge};
use crate::{Point, Rect};

/// Clips a line segment to `clip` and converts it to edges.
///
/// At most three edges come out: the (possibly trimmed) segment itself,
/// plus up to two vertical edges along the clip sides. The vertical edges
/// preserve the winding a horizontal ray would have seen crossing the
/// clipped-away part, so winding counts stay balanced inside the clip.
pub fn clip_line(mut p0: Point, mut p1: Point, clip: &Rect) -> ArrayVec<Edge, 3> {
    let mut edges = ArrayVec::new();

    // Fully above or fully below: nothing crosses a scanline in the clip.
    let above = p0.y < clip.top && p1.y < clip.top;
    let below = p0.y > clip.bottom && p1.y > clip.bottom;
    if above || below {
        return edges;
    }

    // The true winding, before any endpoint swapping.
    let winding = winding_of(p0, p1);
    if winding == 0 {
        return edges;
    }

    // Chop vertically. p0 on top first.
    if p0.y > p1.y {
        std::mem::swap(&mut p0, &mut p1);
    }

    if p0.y < clip.top {
        p0 = Point::from_xy(x_for_y(p0, p1, clip.top), clip.top);
    }

    if p1.y > clip.bottom {
        p1 = Point::from_xy(x_for_y(p0, p1, clip.bottom), clip.bottom);
    }

    // Chop horizontally. p0 on the left first.
    if p0.x > p1.x {
        std::mem::swap(&mut p0, &mut p1);
    }

    // Fully outside on a side: snap onto the clip boundary. The segment
    // still separates inside from outside for rays cast within the clip.
    if p1.x < clip.left {
        push_vertical(&mut edges, clip.left, p0.y, p1.y, winding);
        return edges;
    }

    if p0.x > clip.right {
        push_vertical(&mut edges, clip.right, p0.y, p1.y, winding);
        return edges;
    }

    // Entering across the left side: trim and emit a catch-up edge
    // covering the y range the trimmed part used to cover.
    if p0.x < clip.left {
        let old_y = p0.y;
        p0 = Point::from_xy(clip.left, y_for_x(p0, p1, clip.left));
        push_vertical(&mut edges, clip.left, old_y, p0.y, winding);
    }

    // Same across the right side.
    if p1.x > clip.right {
        let old_y = p1.y;
        p1 = Point::from_xy(clip.right, y_for_x(p0, p1, clip.right));
        push_vertical(&mut edges, clip.right, old_y, p1.y, winding);
    }

    if let Some(edge) = Edge::from_points_with_winding(p0, p1, winding) {
        edges.push(edge);
    }

    edges
}

fn push_vertical(edges: &mut ArrayVec<Edge, 3>, x: f32, y0: f32, y1: f32, winding: i32) {
    let p0 = Point::from_xy(x, y0);
    let p1 = Point::from_xy(x, y1);
    if let Some(edge) = Edge::from_points_with_winding(p0, p1, winding) {
        edges.push(edge);
    }
}

fn x_for_y(p0: Point, p1: Point, y: f32) -> f32 {
    let (m, b) = line_m_and_b(p0, p1);
    m * y + b
}

fn y_for_x(p0: Point, p1: Point, x: f32) -> f32 {
    let (m, _) = line_m_and_b(p0, p1);
    p0.y + (x - p0.x) / m
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP: Rect = Rect { left: 0.0, top: 0.0, right: 100.0, bottom: 100.0 };

    #[test]
    fn fully_above_is_dropped() {
        let edges = clip_line(Point::from_xy(0.0, -20.0), Point::from_xy(50.0, -10.0), &CLIP);
        assert!(edges.is_empty());
    }

    #[test]
    fn inside_passes_through() {
        let edges = clip_line(Point::from_xy(10.0, 10.0), Point::from_xy(20.0, 90.0), &CLIP);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].winding, -1);
        assert_eq!(edges[0].top, 10);
        assert_eq!(edges[0].bottom, 90);
    }

    #[test]
    fn left_entry_emits_catch_up_edge() {
        // From (-10, 0) to (10, 20), slope 1; crosses x=0 at y=10.
        let edges = clip_line(Point::from_xy(-10.0, 0.0), Point::from_xy(10.0, 20.0), &CLIP);
        assert_eq!(edges.len(), 2);

        // Vertical catch-up along the left side covers y 0..10.
        assert_eq!(edges[0].top, 0);
        assert_eq!(edges[0].bottom, 10);
        assert_eq!(edges[0].x_at(5.5), 0.0);
        assert_eq!(edges[0].winding, -1);

        // The trimmed segment covers y 10..20.
        assert_eq!(edges[1].top, 10);
        assert_eq!(edges[1].bottom, 20);
        assert_eq!(edges[1].winding, -1);
    }

    #[test]
    fn fully_left_snaps_to_boundary() {
        let edges = clip_line(Point::from_xy(-30.0, 10.0), Point::from_xy(-20.0, 90.0), &CLIP);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].x_at(50.5), 0.0);
        assert_eq!(edges[0].top, 10);
        assert_eq!(edges[0].bottom, 90);
        assert_eq!(edges[0].winding, -1);
    }

    #[test]
    fn winding_survives_swaps() {
        // Upward segment (+1) entering from the right.
        let edges = clip_line(Point::from_xy(120.0, 80.0), Point::from_xy(80.0, 20.0), &CLIP);
        assert!(!edges.is_empty());
        for e in &edges {
            assert_eq!(e.winding, 1);
        }
    }

    #[test]
    fn vertical_chop_keeps_x_on_line() {
        // From (50, -50) to (50, 50): vertical, clipped at top.
        let edges = clip_line(Point::from_xy(50.0, -50.0), Point::from_xy(50.0, 50.0), &CLIP);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].top, 0);
        assert_eq!(edges[0].bottom, 50);
        assert_eq!(edges[0].x_at(25.5), 50.0);
    }
}
