// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::cmp::Ordering;

use crate::blitter::Blitter;
use crate::edge::Edge;
use crate::floating_point::round_to_i32;

/// Scan-converts path edges with the non-zero winding rule.
///
/// Edges may arrive in any order. For every scanline the active edges are
/// walked left to right at the pixel-center line `y + 0.5`, accumulating a
/// winding counter; a span is emitted each time the counter returns to
/// zero. Edges can cross between scanlines, so the active set is reordered
/// for every line.
pub fn fill_edges(edges: &mut Vec<Edge>, blitter: &mut dyn Blitter) {
    if edges.is_empty() {
        return;
    }

    sort_by_top_then_x(edges);

    let min_y = edges.iter().map(|e| e.top).min().unwrap_or(0);
    let max_y = edges.iter().map(|e| e.bottom).max().unwrap_or(0);

    let mut active: Vec<Edge> = Vec::with_capacity(edges.len());
    let mut next = 0;

    for y in min_y..max_y {
        // Pull in edges starting on this scanline.
        while next < edges.len() && edges[next].top <= y {
            active.push(edges[next]);
            next += 1;
        }

        // Active edges may have crossed since the last line.
        let cy = y as f32 + 0.5;
        active.sort_by(|a, b| {
            a.x_at(cy).partial_cmp(&b.x_at(cy)).unwrap_or(Ordering::Equal)
        });

        let mut w = 0;
        let mut left = 0;
        for edge in &active {
            debug_assert!(edge.is_valid_at(y));

            let x = round_to_i32(edge.x_at(cy));

            if w == 0 {
                left = x;
            }

            w += edge.winding;

            if w == 0 {
                blitter.blit_h(left, y, x - left);
            }
        }

        // A malformed path can leave the counter unbalanced; spans were
        // still emitted best-effort.
        debug_assert!(w == 0);

        active.retain(|e| e.is_valid_at(y + 1));
    }
}

/// The initial ordering: by `top`, breaking ties with the x position at
/// the first scanline center an edge participates in.
fn sort_by_top_then_x(edges: &mut [Edge]) {
    edges.sort_by(|a, b| {
        a.top.cmp(&b.top).then_with(|| {
            let xa = a.x_at(a.top as f32 + 0.5);
            let xb = b.x_at(b.top as f32 + 0.5);
            xa.partial_cmp(&xb).unwrap_or(Ordering::Equal)
        })
    });
}
