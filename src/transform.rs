// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Point;

const INVERT_THRESHOLD: f32 = 1e-6;

/// An affine transformation matrix.
///
/// Stores a 2x3 matrix using column-major-column-vector notation:
///
/// ```text
/// | sx kx tx |    x' = sx*x + kx*y + tx
/// | ky sy ty |    y' = ky*x + sy*y + ty
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform {
            sx: 1.0, kx: 0.0, tx: 0.0,
            ky: 0.0, sy: 1.0, ty: 0.0,
        }
    }
}

impl Transform {
    /// Creates an identity transform.
    #[inline]
    pub fn identity() -> Self {
        Transform::default()
    }

    /// Creates a new `Transform`.
    ///
    /// We are using column-major-column-vector matrix notation,
    /// therefore it's ky-kx, not kx-ky.
    #[inline]
    pub fn from_row(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Transform { sx, ky, kx, sy, tx, ty }
    }

    /// Creates a new translating `Transform`.
    #[inline]
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a new rotating `Transform`, around the origin.
    #[inline]
    pub fn from_rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Creates a transform whose columns are the basis vectors `u` and `v`
    /// placed at `origin`.
    ///
    /// Maps the unit square to the parallelogram `origin + x*u + y*v`.
    /// This is the mapping gradients and triangle shaders use to carry
    /// their unit space into device space.
    #[inline]
    pub fn from_basis(u: Point, v: Point, origin: Point) -> Self {
        Transform::from_row(u.x, u.y, v.x, v.y, origin.x, origin.y)
    }

    /// Checks that the transform is the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Returns the product `self * other`.
    ///
    /// Mapping a point by the result is mapping by `other` first.
    pub fn pre_concat(&self, other: &Transform) -> Transform {
        let a = self;
        let b = other;
        Transform {
            sx: a.sx * b.sx + a.kx * b.ky,
            kx: a.sx * b.kx + a.kx * b.sy,
            tx: a.sx * b.tx + a.kx * b.ty + a.tx,

            ky: a.ky * b.sx + a.sy * b.ky,
            sy: a.ky * b.kx + a.sy * b.sy,
            ty: a.ky * b.tx + a.sy * b.ty + a.ty,
        }
    }

    /// Returns the product `other * self`.
    #[allow(dead_code)]
    pub fn post_concat(&self, other: &Transform) -> Transform {
        other.pre_concat(self)
    }

    /// Returns the inverted transform, unless the matrix is near-singular.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.sx * self.sy - self.ky * self.kx;
        if det.abs() < INVERT_THRESHOLD {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Transform {
            sx: self.sy * inv_det,
            kx: -self.kx * inv_det,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv_det,

            ky: -self.ky * inv_det,
            sy: self.sx * inv_det,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv_det,
        })
    }

    /// Maps a slice of points in place.
    pub fn map_points(&self, points: &mut [Point]) {
        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Maps a single point.
    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        Point::from_xy(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt_eq(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn concat_is_associative_on_points() {
        let a = Transform::from_row(2.0, 0.5, -0.5, 3.0, 10.0, -4.0);
        let b = Transform::from_rotate(0.7).pre_concat(&Transform::from_translate(3.0, 8.0));
        let v = Point::from_xy(-7.0, 11.0);

        let left = a.pre_concat(&b).map_point(v);
        let right = a.map_point(b.map_point(v));
        assert!(pt_eq(left, right));
    }

    #[test]
    fn invert_roundtrip() {
        let ts = Transform::from_row(2.0, 1.0, -1.0, 3.0, 20.0, 30.0);
        let inv = ts.invert().unwrap();
        let id = ts.pre_concat(&inv);

        let p = Point::from_xy(17.0, -3.0);
        assert!(pt_eq(id.map_point(p), p));
    }

    #[test]
    fn degenerate_is_not_invertible() {
        let ts = Transform::from_scale(0.0, 1.0);
        assert!(ts.invert().is_none());

        // Determinant below the tolerance.
        let ts = Transform::from_scale(1e-4, 1e-4);
        assert!(ts.invert().is_none());
    }

    #[test]
    fn rotate_quarter() {
        let ts = Transform::from_rotate(std::f32::consts::FRAC_PI_2);
        assert!(pt_eq(ts.map_point(Point::from_xy(1.0, 0.0)), Point::from_xy(0.0, 1.0)));
    }

    #[test]
    fn map_points_in_place() {
        let ts = Transform::from_translate(10.0, 0.0);
        let mut pts = [Point::from_xy(0.0, 0.0), Point::from_xy(5.0, 5.0)];
        ts.map_points(&mut pts);
        assert_eq!(pts[0], Point::from_xy(10.0, 0.0));
        assert_eq!(pts[1], Point::from_xy(15.0, 5.0));
    }
}
