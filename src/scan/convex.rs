// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::blitter::Blitter;
use crate::edge::Edge;
use crate::floating_point::round_to_i32;

/// Scan-converts a convex polygon's edges.
///
/// Edges must be sorted by `top`. Convexity means exactly two edges cross
/// any scanline, so two active edges are enough: intersect both at the
/// pixel-center line `y + 0.5`, blit between them, and replace an active
/// edge with the next queued one when it expires. Collinear vertices that
/// put three or more edges on one scanline are not supported; the result
/// for such input is unspecified.
pub fn fill_edges(edges: &[Edge], blitter: &mut dyn Blitter) {
    if edges.len() < 2 {
        return;
    }

    debug_assert!(edges.windows(2).all(|w| w[0].top <= w[1].top));

    let min_y = edges.iter().map(|e| e.top).min().unwrap_or(0);
    let max_y = edges.iter().map(|e| e.bottom).max().unwrap_or(0);

    let mut e0 = edges[0];
    let mut e1 = edges[1];
    let mut next = 2;

    for y in min_y..max_y {
        let x0 = round_to_i32(e0.x_at(y as f32 + 0.5));
        let x1 = round_to_i32(e1.x_at(y as f32 + 0.5));
        let left = x0.min(x1);
        let right = x0.max(x1);

        blitter.blit_h(left, y, right - left);

        advance_if_expiring(&mut e0, &mut next, y, edges);
        advance_if_expiring(&mut e1, &mut next, y, edges);
    }
}

fn advance_if_expiring(edge: &mut Edge, next: &mut usize, y: i32, edges: &[Edge]) {
    if y + 1 >= edge.bottom {
        if let Some(new_edge) = edges.get(*next) {
            *edge = *new_edge;
            *next += 1;
        }
    }
}
