// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::scalar::Scalar;
use crate::shaders::gradient::{all_opaque, points_to_unit, GradientStop};
use crate::shaders::{into_shared, Shader, SharedShader};
use crate::{Color, Point, Transform};

/// A linear gradient with caller-positioned colors.
///
/// Like [`LinearGradient`], but `positions[i]` places `colors[i]` along
/// the `start..end` line instead of even spacing. Positions must be
/// monotonic with `positions[0] == 0` and `positions[len - 1] == 1`.
/// Tiling is always pad/clamp.
///
/// Stops are located with a linear scan per pixel; position gradients
/// are expected to carry a handful of stops.
///
/// [`LinearGradient`]: struct.LinearGradient.html
pub struct LinearPositionGradient {
    stops: Vec<GradientStop>,
    opaque: bool,
    unit_to_device: Transform,
    inverse: Transform,
}

impl LinearPositionGradient {
    /// Creates a new position gradient shader.
    ///
    /// Returns `None` when fewer than two stops are given, when `colors`
    /// and `positions` disagree in length, or when `positions` is not a
    /// monotonic cover of `[0, 1]`.
    pub fn new(
        start: Point,
        end: Point,
        colors: &[Color],
        positions: &[f32],
    ) -> Option<SharedShader> {
        if colors.len() < 2 || colors.len() != positions.len() {
            return None;
        }

        if positions[0] != 0.0 || *positions.last()? != 1.0 {
            return None;
        }

        if positions.windows(2).any(|w| w[0] > w[1]) {
            return None;
        }

        let stops = colors
            .iter()
            .zip(positions)
            .map(|(color, position)| GradientStop::new(*position, *color))
            .collect();

        Some(into_shared(LinearPositionGradient {
            stops,
            opaque: all_opaque(colors),
            unit_to_device: points_to_unit(start, end),
            inverse: Transform::identity(),
        }))
    }
}

impl Shader for LinearPositionGradient {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        match ctm.pre_concat(&self.unit_to_device).invert() {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        let fy = y as f32 + 0.5;
        let mut t = self.inverse.map_point(Point::from_xy(x as f32 + 0.5, fy)).x;
        let dt = self.inverse.sx;

        for p in row {
            let tt = t.bound(0.0, 1.0);

            // Bracketing pair: the first segment whose end reaches `tt`.
            let mut k = 0;
            while k + 2 < self.stops.len() && self.stops[k + 1].position.get() < tt {
                k += 1;
            }

            let left = &self.stops[k];
            let right = &self.stops[k + 1];
            let span = right.position.get() - left.position.get();
            // Duplicate positions make a hard stop.
            let ratio = if span > 0.0 {
                (tt - left.position.get()) / span
            } else {
                1.0
            };

            let color = left.color + (right.color - left.color) * ratio;
            *p = color.premultiply();

            t += dt;
        }
    }
}

impl std::fmt::Debug for LinearPositionGradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearPositionGradient")
            .field("stops", &self.stops.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::from_rgba(1.0, 0.0, 0.0, 1.0)
    }

    fn blue() -> Color {
        Color::from_rgba(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn rejects_malformed() {
        let p0 = Point::zero();
        let p1 = Point::from_xy(10.0, 0.0);

        assert!(LinearPositionGradient::new(p0, p1, &[red()], &[0.0]).is_none());
        assert!(LinearPositionGradient::new(p0, p1, &[red(), blue()], &[0.0]).is_none());
        assert!(LinearPositionGradient::new(p0, p1, &[red(), blue()], &[0.1, 1.0]).is_none());
        assert!(LinearPositionGradient::new(p0, p1, &[red(), blue()], &[0.0, 0.9]).is_none());
        assert!(
            LinearPositionGradient::new(p0, p1, &[red(), blue(), red()], &[0.0, 0.7, 0.3])
                .is_none()
        );
    }

    #[test]
    fn uneven_stops() {
        // Red to blue over the first tenth, then blue.
        let shader = LinearPositionGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(100.0, 0.0),
            &[red(), blue(), blue()],
            &[0.0, 0.1, 1.0],
        )
        .unwrap();

        let mut shader = shader.borrow_mut();
        assert!(shader.is_opaque());
        assert!(shader.set_context(Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 100];
        shader.shade_row(0, 0, &mut row);

        // t = 0.005: almost pure red.
        assert!(row[0].red() > 240);
        // Past the 10% mark: pure blue.
        assert_eq!(row[50].get(), 0xFF0000FF);
        assert_eq!(row[99].get(), 0xFF0000FF);
    }
}
