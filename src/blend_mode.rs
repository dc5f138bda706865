// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::{div_by_255, PremultipliedColorU8};

/// A compositing mode.
///
/// The 12 Porter-Duff operators, plus `Modulate`, which the per-triangle
/// modulating shader uses to combine its color and texture rows.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BlendMode {
    /// Replaces destination with zero: fully transparent.
    Clear,
    /// Replaces destination.
    Source,
    /// Preserves destination.
    Destination,
    /// Source over destination.
    SourceOver,
    /// Destination over source.
    DestinationOver,
    /// Source trimmed inside destination.
    SourceIn,
    /// Destination trimmed inside source.
    DestinationIn,
    /// Source trimmed outside destination.
    SourceOut,
    /// Destination trimmed outside source.
    DestinationOut,
    /// Source inside destination blended with destination.
    SourceAtop,
    /// Destination inside source blended with source.
    DestinationAtop,
    /// Each of source and destination trimmed outside the other.
    Xor,
    /// Product of premultiplied colors; darkens destination.
    Modulate,
}

impl Default for BlendMode {
    #[inline]
    fn default() -> Self {
        BlendMode::SourceOver
    }
}

impl BlendMode {
    /// Rewrites the mode into an equivalent cheaper one, given what is
    /// known about the source.
    ///
    /// `is_opaque`/`is_transparent` describe every pixel the source can
    /// produce. Returning `Destination` means the whole draw is a no-op
    /// and the caller should bail out before doing any raster work.
    pub(crate) fn simplify(self, is_opaque: bool, is_transparent: bool) -> BlendMode {
        match self {
            BlendMode::Source if is_transparent => BlendMode::Clear,
            BlendMode::SourceOver if is_opaque => BlendMode::Source,
            BlendMode::SourceOver if is_transparent => BlendMode::Destination,
            BlendMode::DestinationOver if is_transparent => BlendMode::Destination,
            BlendMode::SourceIn if is_transparent => BlendMode::Clear,
            BlendMode::DestinationIn if is_opaque => BlendMode::Destination,
            BlendMode::DestinationIn if is_transparent => BlendMode::Clear,
            BlendMode::SourceOut if is_transparent => BlendMode::Clear,
            BlendMode::DestinationOut if is_opaque => BlendMode::Clear,
            BlendMode::DestinationOut if is_transparent => BlendMode::Destination,
            BlendMode::SourceAtop if is_opaque => BlendMode::SourceIn,
            BlendMode::SourceAtop if is_transparent => BlendMode::Destination,
            BlendMode::DestinationAtop if is_opaque => BlendMode::DestinationOver,
            BlendMode::DestinationAtop if is_transparent => BlendMode::Clear,
            BlendMode::Xor if is_opaque => BlendMode::SourceOut,
            BlendMode::Xor if is_transparent => BlendMode::Destination,
            _ => self,
        }
    }
}

// The per-pixel compositors. Each takes premultiplied src and dst and
// returns a premultiplied result; alpha follows the same equation as the
// color channels. The row blitters are generic over these functions, so
// the match on `BlendMode` happens once per draw, not per pixel.

#[inline]
fn map2(
    src: PremultipliedColorU8,
    dst: PremultipliedColorU8,
    f: impl Fn(u32, u32) -> u32,
) -> PremultipliedColorU8 {
    PremultipliedColorU8::from_rgba(
        f(src.red() as u32, dst.red() as u32) as u8,
        f(src.green() as u32, dst.green() as u32) as u8,
        f(src.blue() as u32, dst.blue() as u32) as u8,
        f(src.alpha() as u32, dst.alpha() as u32) as u8,
    )
}

pub(crate) fn clear(_: PremultipliedColorU8, _: PremultipliedColorU8) -> PremultipliedColorU8 {
    PremultipliedColorU8::TRANSPARENT
}

pub(crate) fn source(src: PremultipliedColorU8, _: PremultipliedColorU8) -> PremultipliedColorU8 {
    src
}

pub(crate) fn destination(_: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    dst
}

pub(crate) fn source_over(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    map2(src, dst, |s, d| s + div_by_255((255 - sa) * d))
}

pub(crate) fn destination_over(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let da = dst.alpha() as u32;
    map2(src, dst, |s, d| d + div_by_255((255 - da) * s))
}

pub(crate) fn source_in(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let da = dst.alpha() as u32;
    map2(src, dst, |s, _| div_by_255(da * s))
}

pub(crate) fn destination_in(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    map2(src, dst, |_, d| div_by_255(sa * d))
}

pub(crate) fn source_out(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let da = dst.alpha() as u32;
    map2(src, dst, |s, _| div_by_255((255 - da) * s))
}

pub(crate) fn destination_out(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    map2(src, dst, |_, d| div_by_255((255 - sa) * d))
}

pub(crate) fn source_atop(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    let da = dst.alpha() as u32;
    map2(src, dst, |s, d| div_by_255(da * s + (255 - sa) * d))
}

pub(crate) fn destination_atop(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    let da = dst.alpha() as u32;
    map2(src, dst, |s, d| div_by_255(sa * d + (255 - da) * s))
}

pub(crate) fn xor(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha() as u32;
    let da = dst.alpha() as u32;
    map2(src, dst, |s, d| div_by_255((255 - sa) * d + (255 - da) * s))
}

pub(crate) fn modulate(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    map2(src, dst, |s, d| div_by_255(s * d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn px(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba(r, g, b, a)
    }

    fn is_premultiplied(c: PremultipliedColorU8) -> bool {
        c.red() <= c.alpha() && c.green() <= c.alpha() && c.blue() <= c.alpha()
    }

    #[test]
    fn results_stay_premultiplied() {
        let procs: &[fn(PremultipliedColorU8, PremultipliedColorU8) -> PremultipliedColorU8] = &[
            clear, source, destination, source_over, destination_over,
            source_in, destination_in, source_out, destination_out,
            source_atop, destination_atop, xor, modulate,
        ];

        let samples = [
            px(0, 0, 0, 0),
            px(10, 20, 30, 40),
            px(128, 0, 64, 128),
            px(255, 255, 255, 255),
            Color::from_rgba(0.9, 0.1, 0.4, 0.7).premultiply(),
        ];

        for proc in procs {
            for &s in &samples {
                for &d in &samples {
                    assert!(is_premultiplied(proc(s, d)), "src={:?} dst={:?}", s, d);
                }
            }
        }
    }

    #[test]
    fn source_over_opaque_replaces() {
        let s = px(255, 0, 0, 255);
        let d = px(0, 128, 0, 128);
        assert_eq!(source_over(s, d), s);
    }

    #[test]
    fn source_over_transparent_keeps_destination() {
        let d = px(17, 5, 99, 200);
        assert_eq!(source_over(px(0, 0, 0, 0), d), d);
    }

    #[test]
    fn clear_is_zero() {
        assert_eq!(clear(px(1, 2, 3, 200), px(9, 9, 9, 255)).get(), 0);
    }

    #[test]
    fn xor_of_opaque_pair_is_transparent() {
        let s = px(255, 0, 0, 255);
        let d = px(0, 0, 255, 255);
        assert_eq!(xor(s, d).get(), 0);
    }

    #[test]
    fn modulate_with_white_is_identity() {
        let d = px(10, 200, 30, 255);
        assert_eq!(modulate(px(255, 255, 255, 255), d), d);
    }

    #[test]
    fn simplify_table() {
        use BlendMode::*;

        assert_eq!(SourceOver.simplify(true, false), Source);
        assert_eq!(SourceOver.simplify(false, true), Destination);
        assert_eq!(SourceOver.simplify(false, false), SourceOver);

        assert_eq!(Source.simplify(false, true), Clear);
        assert_eq!(DestinationOver.simplify(false, true), Destination);
        assert_eq!(SourceIn.simplify(false, true), Clear);
        assert_eq!(DestinationIn.simplify(true, false), Destination);
        assert_eq!(DestinationIn.simplify(false, true), Clear);
        assert_eq!(SourceOut.simplify(false, true), Clear);
        assert_eq!(DestinationOut.simplify(true, false), Clear);
        assert_eq!(DestinationOut.simplify(false, true), Destination);
        assert_eq!(SourceAtop.simplify(true, false), SourceIn);
        assert_eq!(SourceAtop.simplify(false, true), Destination);
        assert_eq!(DestinationAtop.simplify(true, false), DestinationOver);
        assert_eq!(DestinationAtop.simplify(false, true), Clear);
        assert_eq!(Xor.simplify(true, false), SourceOut);
        assert_eq!(Xor.simplify(false, true), Destination);

        // No knowledge, no rewrite.
        assert_eq!(Clear.simplify(false, false), Clear);
        assert_eq!(Modulate.simplify(true, false), Modulate);
    }
}
