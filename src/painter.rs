// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::SharedShader;
use crate::{BlendMode, Color};

/// Controls how a shape should be painted.
///
/// Cloning a paint shares its shader handle, not the shader state.
#[derive(Clone)]
pub struct Paint {
    /// A paint color, used when no shader is set.
    ///
    /// Default: black.
    pub color: Color,

    /// A paint shader. When set, it overrides `color` as the pixel
    /// source.
    ///
    /// Default: None
    pub shader: Option<SharedShader>,

    /// Paint blending mode.
    ///
    /// Default: SourceOver
    pub blend_mode: BlendMode,
}

impl Default for Paint {
    #[inline]
    fn default() -> Self {
        Paint {
            color: Color::BLACK,
            shader: None,
            blend_mode: BlendMode::default(),
        }
    }
}

impl Paint {
    /// Sets the paint color and drops the shader, if any.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.shader = None;
    }

    /// `set_color` via u8 components.
    #[inline]
    pub fn set_color_rgba8(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.set_color(Color::from_rgba8(r, g, b, a))
    }

    /// Resolves the blend mode against what the pixel source can produce.
    ///
    /// A shader reports opacity itself and is never known-transparent;
    /// a plain color is judged by its alpha.
    pub(crate) fn simplified_blend_mode(&self) -> BlendMode {
        match self.shader {
            Some(ref shader) => self.blend_mode.simplify(shader.borrow().is_opaque(), false),
            None => self
                .blend_mode
                .simplify(self.color.a == 1.0, self.color.a == 0.0),
        }
    }
}

impl std::fmt::Debug for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paint")
            .field("color", &self.color)
            .field("has_shader", &self.shader.is_some())
            .field("blend_mode", &self.blend_mode)
            .finish()
    }
}
