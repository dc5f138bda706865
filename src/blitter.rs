// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::blend_mode::{self, BlendMode};
use crate::color::PremultipliedColorU8;
use crate::shaders::Shader;
use crate::Pixmap;

/// Fills horizontal spans of pixels.
///
/// The rasterizers talk to a blitter through this trait, one span at a
/// time. Span coordinates are already clipped to the pixmap.
pub trait Blitter {
    /// Blits `width` pixels starting at `(x, y)`.
    fn blit_h(&mut self, x: i32, y: i32, width: i32);
}

/// The pixel source for one draw call.
pub enum BlitSource<'a> {
    /// A premultiplied constant.
    Solid(PremultipliedColorU8),
    /// A prepared shader; `set_context` has already succeeded.
    Shader(&'a mut dyn Shader),
}

/// Builds the right blitter for `(mode, source)` and hands it to `f`.
///
/// This is the single spot where the blend mode match happens: every arm
/// instantiates the row loop with a concrete blend function, so the
/// per-pixel code pays no dispatch cost. `BlendMode::Destination` must be
/// rejected by the caller beforehand; it is a whole-draw no-op.
pub fn with_blitter(
    pixmap: &mut Pixmap,
    mode: BlendMode,
    source: BlitSource,
    f: &mut dyn FnMut(&mut dyn Blitter),
) {
    debug_assert!(mode != BlendMode::Destination);

    match mode {
        BlendMode::Clear => run(pixmap, source, blend_mode::clear, f),
        BlendMode::Source => run(pixmap, source, blend_mode::source, f),
        BlendMode::Destination => {}
        BlendMode::SourceOver => run(pixmap, source, blend_mode::source_over, f),
        BlendMode::DestinationOver => run(pixmap, source, blend_mode::destination_over, f),
        BlendMode::SourceIn => run(pixmap, source, blend_mode::source_in, f),
        BlendMode::DestinationIn => run(pixmap, source, blend_mode::destination_in, f),
        BlendMode::SourceOut => run(pixmap, source, blend_mode::source_out, f),
        BlendMode::DestinationOut => run(pixmap, source, blend_mode::destination_out, f),
        BlendMode::SourceAtop => run(pixmap, source, blend_mode::source_atop, f),
        BlendMode::DestinationAtop => run(pixmap, source, blend_mode::destination_atop, f),
        BlendMode::Xor => run(pixmap, source, blend_mode::xor, f),
        BlendMode::Modulate => run(pixmap, source, blend_mode::modulate, f),
    }
}

fn run<B>(pixmap: &mut Pixmap, source: BlitSource, blend: B, f: &mut dyn FnMut(&mut dyn Blitter))
where
    B: Fn(PremultipliedColorU8, PremultipliedColorU8) -> PremultipliedColorU8,
{
    match source {
        BlitSource::Solid(src) => {
            let mut blitter = SolidBlitter { pixmap, src, blend };
            f(&mut blitter);
        }
        BlitSource::Shader(shader) => {
            let scratch = vec![PremultipliedColorU8::TRANSPARENT; pixmap.width() as usize];
            let mut blitter = ShaderBlitter { pixmap, shader, scratch, blend };
            f(&mut blitter);
        }
    }
}

struct SolidBlitter<'a, B> {
    pixmap: &'a mut Pixmap,
    src: PremultipliedColorU8,
    blend: B,
}

impl<B> Blitter for SolidBlitter<'_, B>
where
    B: Fn(PremultipliedColorU8, PremultipliedColorU8) -> PremultipliedColorU8,
{
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        if width <= 0 {
            return;
        }

        for dst in self.pixmap.span_mut(x, y, width) {
            *dst = (self.blend)(self.src, *dst);
        }
    }
}

struct ShaderBlitter<'a, B> {
    pixmap: &'a mut Pixmap,
    shader: &'a mut dyn Shader,
    scratch: Vec<PremultipliedColorU8>,
    blend: B,
}

impl<B> Blitter for ShaderBlitter<'_, B>
where
    B: Fn(PremultipliedColorU8, PremultipliedColorU8) -> PremultipliedColorU8,
{
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        if width <= 0 {
            return;
        }

        let scratch = &mut self.scratch[0..width as usize];
        self.shader.shade_row(x, y, scratch);

        let row = self.pixmap.span_mut(x, y, width);
        for (dst, src) in row.iter_mut().zip(scratch.iter()) {
            *dst = (self.blend)(*src, *dst);
        }
    }
}
