// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod color_matrix;
mod gradient;
mod linear_gradient;
mod pattern;
mod position_gradient;
mod sweep_gradient;
mod triangle;
mod voronoi;

pub use color_matrix::{ColorMatrix, ColorMatrixShader};
pub use linear_gradient::LinearGradient;
pub use pattern::Pattern;
pub use position_gradient::LinearPositionGradient;
pub use sweep_gradient::SweepGradient;
pub use triangle::{TriangleColorShader, TriangleModulatingShader, TriangleTextureShader};
pub use voronoi::VoronoiShader;

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::PremultipliedColorU8;
use crate::Transform;

/// A shader specifies the source color(s) for what is being drawn.
///
/// If a paint has no shader, the paint's color is used instead.
///
/// A shader is stateful within a draw: the canvas calls [`set_context`]
/// with the CTM before any [`shade_row`] calls, and the shader keeps the
/// derived inverse mapping until the next draw. This is why shading takes
/// `&mut self` and why shaders are handed around as [`SharedShader`].
///
/// [`set_context`]: trait.Shader.html#tymethod.set_context
/// [`shade_row`]: trait.Shader.html#tymethod.shade_row
pub trait Shader {
    /// Returns `true` iff every pixel this shader can produce is opaque.
    ///
    /// The answer must be conservative: `false` is always sound.
    fn is_opaque(&self) -> bool {
        false
    }

    /// Prepares the shader for a draw under the given CTM.
    ///
    /// Returns `false` when the composite transform is not invertible;
    /// the caller must then skip the draw entirely.
    fn set_context(&mut self, ctm: Transform) -> bool;

    /// Fills `row` with source pixels for the device span starting at
    /// `(x, y)`.
    ///
    /// Pixels are sampled at device centers `(x + 0.5, y + 0.5)` through
    /// `(x + row.len() - 0.5, y + 0.5)`.
    fn shade_row(&mut self, x: i32, y: i32, row: &mut [PremultipliedColorU8]);
}

/// A shared, mutable shader handle.
///
/// Shaders form an ownership DAG: composite shaders (color matrix,
/// triangle texture/modulating) hold handles to their inner shaders, and
/// a paint holds a handle to its root. Single-threaded by design, like
/// the canvas itself.
pub type SharedShader = Rc<RefCell<dyn Shader>>;

/// Wraps a concrete shader into a [`SharedShader`] handle.
pub(crate) fn into_shared<T: Shader + 'static>(shader: T) -> SharedShader {
    Rc::new(RefCell::new(shader))
}

/// How a shader fills space outside its natural domain.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SpreadMode {
    /// Clamp to the nearest edge value.
    Pad,
    /// Repeat the domain with period 1.
    Repeat,
    /// Repeat, mirroring every other period.
    Reflect,
}

impl Default for SpreadMode {
    #[inline]
    fn default() -> Self {
        SpreadMode::Pad
    }
}
