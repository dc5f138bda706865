// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::floating_point::FLOAT_PI;
use crate::scalar::Scalar;
use crate::shaders::gradient::all_opaque;
use crate::shaders::{into_shared, Shader, SharedShader};
use crate::{Color, Point, Transform};

/// A sweep gradient.
///
/// `colors[0]` starts at `start_angle` (radians) around `center`,
/// `colors[len - 1]` ends just short of one full turn, and the sweep
/// wraps back to `colors[0]`. The center and angles live in user space:
/// the shader inverts the plain CTM and measures the angle there.
pub struct SweepGradient {
    center: Point,
    start_angle: f32,
    colors: Vec<Color>,
    opaque: bool,
    inverse: Transform,
}

impl SweepGradient {
    /// Creates a new sweep gradient shader.
    ///
    /// Returns `None` when `colors` is empty.
    pub fn new(center: Point, start_angle: f32, colors: &[Color]) -> Option<SharedShader> {
        if colors.is_empty() {
            return None;
        }

        Some(into_shared(SweepGradient {
            center,
            start_angle,
            colors: colors.to_vec(),
            opaque: all_opaque(colors),
            inverse: Transform::identity(),
        }))
    }
}

impl Shader for SweepGradient {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        match ctm.invert() {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        let count = self.colors.len();
        let fy = y as f32 + 0.5;

        for (i, p) in row.iter_mut().enumerate() {
            let device = Point::from_xy(x as f32 + i as f32 + 0.5, fy);
            let user = self.inverse.map_point(device);

            let mut angle = (user.y - self.center.y).atan2(user.x - self.center.x);
            angle -= self.start_angle;
            if angle < 0.0 {
                angle += 2.0 * FLOAT_PI;
            }

            let turn = (angle / (2.0 * FLOAT_PI)).bound(0.0, 1.0);

            // Scale into [0, count]; the last segment wraps to color 0.
            let scaled = turn * count as f32;
            let prev = (scaled as usize).min(count - 1);
            let mut next = scaled.ceil() as usize;
            if next >= count {
                next = 0;
            }

            let d = scaled - prev as f32;
            let color = self.colors[prev] * (1.0 - d) + self.colors[next] * d;
            *p = color.premultiply();
        }
    }
}

impl std::fmt::Debug for SweepGradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepGradient")
            .field("center", &self.center)
            .field("start_angle", &self.start_angle)
            .field("colors", &self.colors.len())
            .finish()
    }
}
