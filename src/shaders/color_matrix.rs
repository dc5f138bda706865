// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayref::array_ref;

use crate::color::PremultipliedColorU8;
use crate::shaders::{into_shared, Shader, SharedShader};
use crate::{Color, Transform};

/// A 4x5 color matrix over unpremultiplied RGBA.
///
/// Stored column-major: 4 columns of input coefficients (r, g, b, a) and
/// a final translation column. A result component is
/// `m[c][0]*r + m[c][1]*g + m[c][2]*b + m[c][3]*a + t[c]`, clamped to
/// `[0, 1]` afterwards.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// The identity matrix.
    pub fn identity() -> Self {
        let mut m = [0.0; 20];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        ColorMatrix(m)
    }

    /// Applies the matrix to an unpremultiplied color and clamps the
    /// result back into range.
    pub fn apply(&self, color: &Color) -> Color {
        let cr = array_ref![self.0, 0, 4];
        let cg = array_ref![self.0, 4, 4];
        let cb = array_ref![self.0, 8, 4];
        let ca = array_ref![self.0, 12, 4];
        let ct = array_ref![self.0, 16, 4];

        let out = Color::from_rgba(
            cr[0] * color.r + cg[0] * color.g + cb[0] * color.b + ca[0] * color.a + ct[0],
            cr[1] * color.r + cg[1] * color.g + cb[1] * color.b + ca[1] * color.a + ct[1],
            cr[2] * color.r + cg[2] * color.g + cb[2] * color.b + ca[2] * color.a + ct[2],
            cr[3] * color.r + cg[3] * color.g + cb[3] * color.b + ca[3] * color.a + ct[3],
        );

        out.pin_to_unit()
    }
}

/// A shader that proxies another shader through a color matrix.
///
/// Per row: run the inner shader, unpremultiply each pixel, apply the
/// matrix, repremultiply.
pub struct ColorMatrixShader {
    matrix: ColorMatrix,
    inner: SharedShader,
    scratch: Vec<PremultipliedColorU8>,
}

impl ColorMatrixShader {
    /// Creates a new color matrix shader around `inner`.
    pub fn new(matrix: ColorMatrix, inner: SharedShader) -> SharedShader {
        into_shared(ColorMatrixShader {
            matrix,
            inner,
            scratch: Vec::new(),
        })
    }
}

impl Shader for ColorMatrixShader {
    // A matrix can produce translucency out of opaque input, and proving
    // otherwise is not worth it. Always conservative.
    fn is_opaque(&self) -> bool {
        false
    }

    fn set_context(&mut self, ctm: Transform) -> bool {
        self.inner.borrow_mut().set_context(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]) {
        self.scratch.resize(row.len(), PremultipliedColorU8::TRANSPARENT);
        let scratch = &mut self.scratch[0..row.len()];
        self.inner.borrow_mut().shade_row(x, y, scratch);

        for (p, base) in row.iter_mut().zip(scratch.iter()) {
            let color = self.matrix.apply(&base.demultiply());
            *p = color.premultiply();
        }
    }
}

impl std::fmt::Debug for ColorMatrixShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorMatrixShader")
            .field("matrix", &self.matrix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_color() {
        let m = ColorMatrix::identity();
        let c = Color::from_rgba(0.25, 0.5, 0.75, 1.0);
        assert_eq!(m.apply(&c), c);
    }

    #[test]
    fn swap_red_and_green() {
        let mut m = [0.0; 20];
        m[1] = 1.0; // input r -> output g
        m[4] = 1.0; // input g -> output r
        m[10] = 1.0;
        m[15] = 1.0;
        let m = ColorMatrix(m);

        let c = m.apply(&Color::from_rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(c, Color::from_rgba(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let mut m = [0.0; 20];
        m[0] = 2.0;
        m[15] = 1.0;
        m[17] = -0.5; // g translation
        let m = ColorMatrix(m);

        let c = m.apply(&Color::from_rgba(1.0, 1.0, 1.0, 1.0));
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
    }
}
