// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::cell::RefCell;
use std::rc::Rc;

use crate::blend_mode;
use crate::color::PremultipliedColorU8;
use crate::scalar::Scalar;
use crate::shaders::{Shader, SharedShader};
use crate::{Color, Point, Transform};

/// Maps unit barycentric space onto a triangle: `(1, 0)` lands on `p1`,
/// `(0, 1)` on `p2` and the origin on `p0`.
fn barycentric_to_device(p0: Point, p1: Point, p2: Point) -> Transform {
    Transform::from_basis(p1 - p0, p2 - p0, p0)
}

/// Interpolates three vertex colors across a triangle.
///
/// `set_context` inverts the barycentric mapping composed with the CTM;
/// a row is then an affine function of the pixel index, so the color
/// advances by a precomputed step per pixel.
pub struct TriangleColorShader {
    colors: [Color; 3],
    unit_to_device: Transform,
    inverse: Transform,
}

impl TriangleColorShader {
    /// Creates a new triangle color shader.
    pub fn new(points: [Point; 3], colors: [Color; 3]) -> Self {
        TriangleColorShader {
            colors,
            unit_to_device: barycentric_to_device(points[0], points[1], points[2]),
            inverse: Transform::identity(),
        }
    }

    /// Re-targets the shader onto another triangle.
    ///
    /// Mesh drawing walks many triangles with one shader instance;
    /// rebuilding per triangle would dominate small-triangle meshes.
    pub fn update(&mut self, points: [Point; 3], colors: [Color; 3]) {
        self.colors = colors;
        self.unit_to_device = barycentric_to_device(points[0], points[1], points[2]);
    }

    fn shade_row_impl(
        &self,
        x: i32,
        y: i32,
        row: &mut [PremultipliedColorU8],
        pack: impl Fn(&Color) -> PremultipliedColorU8,
    ) {
        let center = Point::from_xy(x as f32 + 0.5, y as f32 + 0.5);
        let uv = self.inverse.map_point(center);

        let w0 = (1.0 - uv.x - uv.y).bound(0.0, 1.0);
        let w1 = uv.x.bound(0.0, 1.0);
        let w2 = uv.y.bound(0.0, 1.0);

        let mut color = self.colors[0] * w0 + self.colors[1] * w1 + self.colors[2] * w2;

        // d(u)/d(x) and d(v)/d(x) are the inverse's first column.
        let du = self.inverse.sx;
        let dv = self.inverse.ky;
        let step = self.colors[0] * (-du - dv) + self.colors[1] * du + self.colors[2] * dv;

        for p in row {
            *p = pack(&color);
            color += step;
        }
    }
}

impl Shader for TriangleColorShader {
    fn is_opaque(&self) -> bool {
        self.colors.iter().all(|c| c.is_opaque())
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
        if self.is_opaque() {
            self.shade_row_impl(x, y, row, |c| c.premultiply_opaque());
        } else {
            self.shade_row_impl(x, y, row, |c| c.premultiply());
        }
    }
}

impl std::fmt::Debug for TriangleColorShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleColorShader").finish()
    }
}

/// Remaps a base shader through a triangle's texture coordinates.
///
/// Builds the barycentric mapping for the device triangle and for the
/// texture triangle; composing `ctm * device * texture^-1` and handing
/// that to the base shader makes device pixel centers land in the base
/// shader's own space. Rows forward untouched.
pub struct TriangleTextureShader {
    base: SharedShader,
    unit_to_device: Transform,
    unit_to_texture: Transform,
}

impl TriangleTextureShader {
    /// Creates a new triangle texture shader over `base`.
    pub fn new(base: SharedShader, points: [Point; 3], texs: [Point; 3]) -> Self {
        TriangleTextureShader {
            base,
            unit_to_device: barycentric_to_device(points[0], points[1], points[2]),
            unit_to_texture: barycentric_to_device(texs[0], texs[1], texs[2]),
        }
    }

    /// Re-targets the shader onto another triangle.
    pub fn update(&mut self, points: [Point; 3], texs: [Point; 3]) {
        self.unit_to_device = barycentric_to_device(points[0], points[1], points[2]);
        self.unit_to_texture = barycentric_to_device(texs[0], texs[1], texs[2]);
    }
}

impl Shader for TriangleTextureShader {
    fn is_opaque(&self) -> bool {
        self.base.borrow().is_opaque()
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        let texture_to_unit = match self.unit_to_texture.invert() {
            Some(ts) => ts,
            None => return false,
        };

        let ts = ctm
            .pre_concat(&self.unit_to_device)
            .pre_concat(&texture_to_unit);
        self.base.borrow_mut().set_context(ts)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        self.base.borrow_mut().shade_row(x, y, row);
    }
}

impl std::fmt::Debug for TriangleTextureShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleTextureShader").finish()
    }
}

/// Multiplies a triangle color shader with a triangle texture shader.
///
/// Runs both into scratch rows and combines them with the Modulate
/// blend. The sub-shaders are shared handles so mesh drawing can keep
/// updating them in place.
pub struct TriangleModulatingShader {
    /// The color half.
    pub color: Rc<RefCell<TriangleColorShader>>,
    /// The texture half.
    pub texture: Rc<RefCell<TriangleTextureShader>>,
    color_row: Vec<PremultipliedColorU8>,
}

impl TriangleModulatingShader {
    /// Creates a new modulating shader from the two halves.
    pub fn new(
        color: Rc<RefCell<TriangleColorShader>>,
        texture: Rc<RefCell<TriangleTextureShader>>,
    ) -> Self {
        TriangleModulatingShader {
            color,
            texture,
            color_row: Vec::new(),
        }
    }
}

impl Shader for TriangleModulatingShader {
    fn is_opaque(&self) -> bool {
        self.color.borrow().is_opaque() && self.texture.borrow().is_opaque()
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        self.color.borrow_mut().set_context(ctm) && self.texture.borrow_mut().set_context(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        self.color_row.resize(row.len(), PremultipliedColorU8::TRANSPARENT);
        let color_row = &mut self.color_row[0..row.len()];

        self.color.borrow_mut().shade_row(x, y, color_row);
        self.texture.borrow_mut().shade_row(x, y, row);

        for (p, c) in row.iter_mut().zip(color_row.iter()) {
            *p = blend_mode::modulate(*c, *p);
        }
    }
}

impl std::fmt::Debug for TriangleModulatingShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleModulatingShader").finish()
    }
}
