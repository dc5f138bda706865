// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::scalar::Scalar;
use crate::shaders::gradient::{all_opaque, points_to_unit, reflect_unit, spread_unit};
use crate::shaders::{into_shared, Shader, SharedShader, SpreadMode};
use crate::{Color, Point, Transform};

/// A linear gradient with evenly spaced colors.
///
/// `colors[0]` sits at `start`, `colors[len - 1]` at `end`, the rest
/// evenly between. The constructor picks one of three specializations by
/// color count; one and two colors dominate real use and have much
/// cheaper rows.
#[derive(Copy, Clone, Debug)]
pub struct LinearGradient;

impl LinearGradient {
    /// Creates a new linear gradient shader.
    ///
    /// Returns `None` when `colors` is empty.
    ///
    /// A degenerate line (`start == end`) is allowed here; the draw is
    /// skipped later when `set_context` fails to invert the mapping.
    pub fn new(
        start: Point,
        end: Point,
        colors: &[Color],
        mode: SpreadMode,
    ) -> Option<SharedShader> {
        match colors.len() {
            0 => None,
            1 => Some(into_shared(SingleColor {
                pixel: colors[0].premultiply(),
                opaque: colors[0].is_opaque(),
            })),
            2 => Some(into_shared(TwoColor {
                color0: colors[0],
                diff: colors[1] - colors[0],
                opaque: all_opaque(colors),
                unit_to_device: points_to_unit(start, end),
                inverse: Transform::identity(),
                mode,
            })),
            _ => {
                let diffs = colors.windows(2).map(|w| w[1] - w[0]).collect();
                Some(into_shared(MultiColor {
                    colors: colors.to_vec(),
                    diffs,
                    opaque: all_opaque(colors),
                    unit_to_device: points_to_unit(start, end),
                    inverse: Transform::identity(),
                    mode,
                }))
            }
        }
    }
}

/// One color: a constant row, no transform involved.
struct SingleColor {
    pixel: PremultipliedColorU8,
    opaque: bool,
}

impl Shader for SingleColor {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, _: Transform) -> bool {
        true
    }

    fn shade_row(&mut self, _: i32, _: i32, row: &mut [PremultipliedColorU8]) {
        for p in row {
            *p = self.pixel;
        }
    }
}

/// Two colors: a single lerp per pixel.
struct TwoColor {
    color0: Color,
    diff: Color,
    opaque: bool,
    unit_to_device: Transform,
    inverse: Transform,
    mode: SpreadMode,
}

impl TwoColor {
    fn shade_row_impl(
        &self,
        x: i32,
        y: i32,
        row: &mut [PremultipliedColorU8],
        pack: impl Fn(&Color) -> PremultipliedColorU8,
    ) {
        let fy = y as f32 + 0.5;
        let t0 = self.inverse.map_point(Point::from_xy(x as f32 + 0.5, fy)).x;
        let t1 = self
            .inverse
            .map_point(Point::from_xy((x + row.len() as i32 - 1) as f32 + 0.5, fy))
            .x;
        let dt = self.inverse.sx;

        if 0.0 <= t0 && t0 <= 1.0 && 0.0 <= t1 && t1 <= 1.0 {
            // The whole span stays inside the unit interval: step the
            // color itself and skip per-pixel tiling.
            let d_color = self.diff * dt;
            let mut color = self.color0 + self.diff * t0;
            for p in row {
                *p = pack(&color);
                color += d_color;
            }
        } else {
            let mut t = t0;
            for p in row {
                let tt = spread_unit(t, self.mode);
                let color = self.color0 + self.diff * tt;
                *p = pack(&color);
                t += dt;
            }
        }
    }
}

impl Shader for TwoColor {
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
        if self.opaque {
            self.shade_row_impl(x, y, row, |c| c.premultiply_opaque());
        } else {
            self.shade_row_impl(x, y, row, |c| c.premultiply());
        }
    }
}

/// Three or more evenly spaced colors.
///
/// Works in a scaled parameter `t * (len - 1)`, so the floor is directly
/// the segment index and the per-segment deltas are precomputed.
struct MultiColor {
    colors: Vec<Color>,
    diffs: Vec<Color>,
    opaque: bool,
    unit_to_device: Transform,
    inverse: Transform,
    mode: SpreadMode,
}

impl MultiColor {
    fn shade_row_impl(
        &self,
        x: i32,
        y: i32,
        row: &mut [PremultipliedColorU8],
        pack: impl Fn(&Color) -> PremultipliedColorU8,
    ) {
        let gaps = (self.colors.len() - 1) as f32;
        let t = self
            .inverse
            .map_point(Point::from_xy(x as f32 + 0.5, y as f32 + 0.5))
            .x;

        let mut scaled = t * gaps;
        let step = self.inverse.sx * gaps;

        for p in row {
            let folded = match self.mode {
                SpreadMode::Pad => scaled.bound(0.0, gaps),
                SpreadMode::Repeat => (scaled * (1.0 / gaps)).fract1() * gaps,
                SpreadMode::Reflect => reflect_unit(scaled * (1.0 / gaps)) * gaps,
            };

            // At exactly `gaps` the floor is one past the last segment.
            let index = (folded as usize).min(self.diffs.len() - 1);
            let d = folded - index as f32;

            let color = self.colors[index] + self.diffs[index] * d;
            *p = pack(&color);

            scaled += step;
        }
    }
}

impl Shader for MultiColor {
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
        if self.opaque {
            self.shade_row_impl(x, y, row, |c| c.premultiply_opaque());
        } else {
            self.shade_row_impl(x, y, row, |c| c.premultiply());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_colors() {
        assert!(LinearGradient::new(
            Point::zero(),
            Point::from_xy(10.0, 0.0),
            &[],
            SpreadMode::Pad,
        )
        .is_none());
    }

    #[test]
    fn single_color_is_constant() {
        let shader = LinearGradient::new(
            Point::zero(),
            Point::from_xy(10.0, 0.0),
            &[Color::from_rgba(1.0, 0.0, 0.0, 1.0)],
            SpreadMode::Pad,
        )
        .unwrap();

        let mut shader = shader.borrow_mut();
        assert!(shader.is_opaque());
        assert!(shader.set_context(Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 4];
        shader.shade_row(0, 0, &mut row);
        for p in &row {
            assert_eq!(p.get(), 0xFFFF0000);
        }
    }

    #[test]
    fn two_color_midpoint() {
        let shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(8.0, 0.0),
            &[
                Color::from_rgba(1.0, 0.0, 0.0, 1.0),
                Color::from_rgba(0.0, 0.0, 1.0, 1.0),
            ],
            SpreadMode::Pad,
        )
        .unwrap();

        let mut shader = shader.borrow_mut();
        assert!(shader.set_context(Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 8];
        shader.shade_row(0, 0, &mut row);

        // t at x=3 is 3.5/8; t at x=4 is 4.5/8: symmetric around the middle.
        assert_eq!(row[3].red(), row[4].blue());
        assert_eq!(row[3].blue(), row[4].red());
        assert!(row[0].red() > 200);
        assert!(row[7].blue() > 200);
        for p in &row {
            assert_eq!(p.alpha(), 255);
        }
    }

    #[test]
    fn multi_color_hits_middle_stop() {
        let shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            &[
                Color::from_rgba(1.0, 0.0, 0.0, 1.0),
                Color::from_rgba(0.0, 1.0, 0.0, 1.0),
                Color::from_rgba(0.0, 0.0, 1.0, 1.0),
            ],
            SpreadMode::Pad,
        )
        .unwrap();

        let mut shader = shader.borrow_mut();
        assert!(shader.set_context(Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 10];
        shader.shade_row(0, 0, &mut row);

        // The center pixel (t = 0.45..0.55) is dominated by the middle color.
        assert!(row[4].green() > 200);
        assert!(row[4].red() < 40);
        assert!(row[4].blue() < 40);
    }

    #[test]
    fn degenerate_line_fails_context() {
        let shader = LinearGradient::new(
            Point::from_xy(5.0, 5.0),
            Point::from_xy(5.0, 5.0),
            &[Color::BLACK, Color::WHITE],
            SpreadMode::Pad,
        )
        .unwrap();

        assert!(!shader.borrow_mut().set_context(Transform::identity()));
    }
}
