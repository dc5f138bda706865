// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::rect::IntRect;
use crate::Color;

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A container that owns premultiplied ARGB pixels.
///
/// The data is not aligned, therefore width == stride.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Pixmap {
    /// Allocates a new pixmap.
    ///
    /// A pixmap is filled with transparent black by default, aka (0, 0, 0, 0).
    ///
    /// Zero size is an error.
    ///
    /// Pixmap's width is limited by i32::MAX/4.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let data_len = data_len(width, height)?;
        Some(Pixmap {
            data: vec![0; data_len],
            width,
            height,
        })
    }

    /// Returns pixmap's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns pixmap's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns pixmap's rect: `(0, 0, width, height)`.
    pub(crate) fn rect(&self) -> IntRect {
        IntRect::from_ltrb(0, 0, self.width as i32, self.height as i32)
    }

    /// Fills the entire pixmap with a specified color.
    pub fn fill(&mut self, color: Color) {
        let c = color.premultiply();
        for p in self.pixels_mut() {
            *p = c;
        }
    }

    /// Returns the internal data.
    ///
    /// Pixels are packed ARGB, so on little-endian hosts the byte order
    /// is BGRA.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns a pixel color.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) as usize;
            Some(self.pixels()[idx])
        } else {
            None
        }
    }

    /// Returns a slice of pixels.
    pub fn pixels(&self) -> &[PremultipliedColorU8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    /// Returns a mutable slice of pixels.
    pub fn pixels_mut(&mut self) -> &mut [PremultipliedColorU8] {
        bytemuck::cast_slice_mut(self.data.as_mut_slice())
    }

    /// Returns a mutable row fragment: `width` pixels starting at `(x, y)`.
    ///
    /// The span must be in bounds.
    pub(crate) fn span_mut(&mut self, x: i32, y: i32, width: i32) -> &mut [PremultipliedColorU8] {
        debug_assert!(x >= 0 && y >= 0 && width >= 0);
        debug_assert!(x + width <= self.width as i32);
        debug_assert!(y < self.height as i32);

        let start = y as usize * self.width as usize + x as usize;
        &mut self.pixels_mut()[start..start + width as usize]
    }

    /// Checks that every pixel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.pixels().iter().all(|p| p.is_opaque())
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[inline]
fn data_len(width: u32, height: u32) -> Option<usize> {
    let len = (width as usize).checked_mul(height as usize)?;
    let len = len.checked_mul(BYTES_PER_PIXEL)?;
    if len <= i32::MAX as usize {
        Some(len)
    } else {
        None
    }
}

#[cfg(feature = "png-format")]
impl Pixmap {
    /// Decodes PNG data into a `Pixmap`.
    ///
    /// Only 8-bit images are supported. Index PNGs are not supported.
    ///
    /// Alpha is premultiplied and the RGBA bytes are repacked into ARGB
    /// pixels on the way in.
    pub fn decode_png(data: &[u8]) -> Option<Self> {
        let decoder = png::Decoder::new(data);
        let mut reader = decoder.read_info().ok()?;

        let mut img_data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut img_data).ok()?;

        if info.bit_depth != png::BitDepth::Eight {
            return None;
        }

        let mut pixmap = Pixmap::new(info.width, info.height)?;

        {
            let pixels = pixmap.pixels_mut();
            match info.color_type {
                png::ColorType::Rgb => {
                    for (i, rgb) in img_data.chunks(3).enumerate() {
                        pixels[i] = PremultipliedColorU8::from_rgba(rgb[0], rgb[1], rgb[2], 255);
                    }
                }
                png::ColorType::Rgba => {
                    for (i, rgba) in img_data.chunks(4).enumerate() {
                        pixels[i] = Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
                            .premultiply();
                    }
                }
                png::ColorType::Grayscale => {
                    for (i, gray) in img_data.iter().enumerate() {
                        pixels[i] = PremultipliedColorU8::from_rgba(*gray, *gray, *gray, 255);
                    }
                }
                png::ColorType::GrayscaleAlpha => {
                    for (i, ga) in img_data.chunks(2).enumerate() {
                        pixels[i] = Color::from_rgba8(ga[0], ga[0], ga[0], ga[1]).premultiply();
                    }
                }
                png::ColorType::Indexed => return None,
            }
        }

        Some(pixmap)
    }

    /// Loads a PNG file into a `Pixmap`.
    pub fn load_png<P: AsRef<std::path::Path>>(path: P) -> Option<Self> {
        let data = std::fs::read(path).ok()?;
        Self::decode_png(&data)
    }

    /// Encodes pixmap into PNG data.
    ///
    /// Alpha is demultiplied and pixels are written out as RGBA bytes.
    pub fn encode_png(&self) -> Option<Vec<u8>> {
        let mut rgba = Vec::with_capacity(self.data.len());
        for pixel in self.pixels() {
            let c = pixel.demultiply();
            rgba.push((c.r * 255.0 + 0.5) as u8);
            rgba.push((c.g * 255.0 + 0.5) as u8);
            rgba.push((c.b * 255.0 + 0.5) as u8);
            rgba.push((c.a * 255.0 + 0.5) as u8);
        }

        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().ok()?;
            writer.write_image_data(&rgba).ok()?;
        }

        Some(data)
    }

    /// Saves pixmap as a PNG file.
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Option<()> {
        let data = self.encode_png()?;
        std::fs::write(path, data).ok()
    }
}
