// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::shaders::gradient::all_opaque;
use crate::shaders::{into_shared, Shader, SharedShader};
use crate::{Color, Point, Transform};

/// A Voronoi shader.
///
/// Every pixel takes the color of the nearest seed point, by Euclidean
/// distance in user space. The search is a linear scan over the seeds.
pub struct VoronoiShader {
    points: Vec<Point>,
    colors: Vec<Color>,
    opaque: bool,
    inverse: Transform,
}

impl VoronoiShader {
    /// Creates a new Voronoi shader.
    ///
    /// Returns `None` when no seeds are given or when `points` and
    /// `colors` disagree in length.
    pub fn new(points: &[Point], colors: &[Color]) -> Option<SharedShader> {
        if points.is_empty() || points.len() != colors.len() {
            return None;
        }

        Some(into_shared(VoronoiShader {
            points: points.to_vec(),
            colors: colors.to_vec(),
            opaque: all_opaque(colors),
            inverse: Transform::identity(),
        }))
    }
}

impl Shader for VoronoiShader {
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
        let fy = y as f32 + 0.5;

        for (i, p) in row.iter_mut().enumerate() {
            let device = Point::from_xy(x as f32 + i as f32 + 0.5, fy);
            let user = self.inverse.map_point(device);

            let mut min_distance = f32::MAX;
            let mut closest = self.colors[0];

            for (seed, color) in self.points.iter().zip(self.colors.iter()) {
                let distance = user.distance_to(*seed);
                if distance < min_distance {
                    min_distance = distance;
                    closest = *color;
                }
            }

            *p = closest.premultiply();
        }
    }
}

impl std::fmt::Debug for VoronoiShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoronoiShader")
            .field("points", &self.points.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_seed_wins() {
        let shader = VoronoiShader::new(
            &[Point::from_xy(25.0, 50.0), Point::from_xy(75.0, 50.0)],
            &[
                Color::from_rgba(1.0, 0.0, 0.0, 1.0),
                Color::from_rgba(0.0, 0.0, 1.0, 1.0),
            ],
        )
        .unwrap();

        let mut shader = shader.borrow_mut();
        assert!(shader.set_context(Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 1];
        shader.shade_row(10, 50, &mut row);
        assert_eq!(row[0].get(), 0xFFFF0000);

        shader.shade_row(90, 50, &mut row);
        assert_eq!(row[0].get(), 0xFF0000FF);
    }

    #[test]
    fn mismatched_lengths() {
        assert!(VoronoiShader::new(&[Point::zero()], &[]).is_none());
        assert!(VoronoiShader::new(&[], &[]).is_none());
    }
}
