// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::rc::Rc;

use crate::color::PremultipliedColorU8;
use crate::scalar::Scalar;
use crate::shaders::{into_shared, Shader, SharedShader, SpreadMode};
use crate::{Pixmap, Transform};

/// A bitmap shader.
///
/// Samples a pixmap with nearest-neighbor filtering: the device pixel
/// center is mapped through the inverse of `ctm * local_matrix`, tiled
/// per axis into `[0, w) x [0, h)` and floored to a source pixel.
pub struct Pattern {
    pixmap: Rc<Pixmap>,
    local_matrix: Transform,
    spread_mode: SpreadMode,
    opaque: bool,
    inverse: Transform,
}

impl Pattern {
    /// Creates a new bitmap shader.
    pub fn new(pixmap: Rc<Pixmap>, local_matrix: Transform, spread_mode: SpreadMode) -> SharedShader {
        let opaque = pixmap.is_opaque();
        into_shared(Pattern {
            pixmap,
            local_matrix,
            spread_mode,
            opaque,
            inverse: Transform::identity(),
        })
    }

    fn shade_row_impl(
        &self,
        x: i32,
        y: i32,
        row: &mut [PremultipliedColorU8],
        tile_x: impl Fn(f32) -> f32,
        tile_y: impl Fn(f32) -> f32,
    ) {
        let max_x = self.pixmap.width() as i32 - 1;
        let max_y = self.pixmap.height() as i32 - 1;

        let start = self.inverse.map_point(crate::Point::from_xy(
            x as f32 + 0.5,
            y as f32 + 0.5,
        ));
        let mut px = start.x;
        let mut py = start.y;

        // The inverse's first column is the per-pixel step. When a
        // component is near zero the corresponding source coordinate is
        // constant across the row and can be tiled once.
        let dx = self.inverse.sx;
        let dy = self.inverse.ky;

        // Tiling lands on [0, size]; the floor of the far boundary is one
        // past the last pixel, so the index is clamped after truncation.
        let sample = |fx: f32, fy: f32| -> PremultipliedColorU8 {
            let sx = (fx as i32).max(0).min(max_x);
            let sy = (fy as i32).max(0).min(max_y);
            self.pixmap.pixel(sx as u32, sy as u32).unwrap_or(PremultipliedColorU8::TRANSPARENT)
        };

        if dx.is_nearly_zero() && dy.is_nearly_zero() {
            let pixel = sample(tile_x(px), tile_y(py));
            for p in row {
                *p = pixel;
            }
        } else if dx.is_nearly_zero() {
            let fx = tile_x(px);
            for p in row {
                *p = sample(fx, tile_y(py));
                py += dy;
            }
        } else if dy.is_nearly_zero() {
            let fy = tile_y(py);
            for p in row {
                *p = sample(tile_x(px), fy);
                px += dx;
            }
        } else {
            for p in row {
                *p = sample(tile_x(px), tile_y(py));
                px += dx;
                py += dy;
            }
        }
    }
}

impl Shader for Pattern {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        match ctm.pre_concat(&self.local_matrix).invert() {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        let w = self.pixmap.width() as f32;
        let h = self.pixmap.height() as f32;
        let inv_w = 1.0 / w;
        let inv_h = 1.0 / h;
        let max_x = w - 1.0;
        let max_y = h - 1.0;

        match self.spread_mode {
            SpreadMode::Pad => {
                self.shade_row_impl(x, y, row, |v| v.bound(0.0, max_x), |v| v.bound(0.0, max_y));
            }
            SpreadMode::Repeat => {
                self.shade_row_impl(x, y, row, |v| repeat(v, w, inv_w), |v| repeat(v, h, inv_h));
            }
            SpreadMode::Reflect => {
                self.shade_row_impl(x, y, row, |v| reflect(v, w, inv_w), |v| reflect(v, h, inv_h));
            }
        }
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("pixmap", &self.pixmap)
            .field("spread_mode", &self.spread_mode)
            .finish()
    }
}

/// Folds `v` into `[0, size)` with period `size`.
#[inline]
fn repeat(v: f32, size: f32, inv_size: f32) -> f32 {
    if v >= 0.0 && v < size {
        v
    } else {
        (v * inv_size).fract1() * size
    }
}

/// Folds `v` into `[0, size]`, mirroring every other period.
#[inline]
fn reflect(v: f32, size: f32, inv_size: f32) -> f32 {
    if v >= 0.0 && v <= size {
        v
    } else {
        let unit = v * inv_size;
        let half = unit * 0.5;
        2.0 * (half - (half + 0.5).floor()).abs() * size
    }
}
