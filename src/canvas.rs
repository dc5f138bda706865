// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::cell::RefCell;
use std::rc::Rc;

use crate::blitter::{self, BlitSource, Blitter};
use crate::edge_builder::EdgeBuilder;
use crate::painter::Paint;
use crate::scan;
use crate::shaders::{SharedShader, TriangleColorShader, TriangleModulatingShader, TriangleTextureShader};
use crate::{BlendMode, Color, Path, Pixmap, Point, Rect, Transform};

/// Provides a high-level rendering API.
///
/// A canvas owns its pixmap and a stack of transforms (the CTM stack).
/// Drawing commands are unchecked: degenerate input is silently skipped
/// and a caller has no way of observing it.
///
/// Single-threaded by contract; every draw call fully commits its pixels
/// before returning.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct Canvas {
    /// A pixmap owned by the canvas.
    pub pixmap: Pixmap,

    /// The CTM stack. Never empty.
    transforms: Vec<Transform>,
}

impl From<Pixmap> for Canvas {
    #[inline]
    fn from(pixmap: Pixmap) -> Self {
        Canvas {
            pixmap,
            transforms: vec![Transform::identity()],
        }
    }
}

impl Canvas {
    /// Creates a new canvas backed by a freshly allocated pixmap.
    ///
    /// Zero size is an error.
    #[inline]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Canvas::from(Pixmap::new(width, height)?))
    }

    /// The current transformation matrix.
    #[inline]
    pub fn get_transform(&self) -> Transform {
        self.transforms.last().copied().unwrap_or_default()
    }

    /// Pushes a copy of the current CTM onto the stack.
    pub fn save(&mut self) {
        self.transforms.push(self.get_transform());
    }

    /// Pops the CTM stack, restoring the matrix saved by the matching
    /// `save`.
    ///
    /// Popping past the bottom resets the canvas to the identity instead
    /// of failing.
    pub fn restore(&mut self) {
        self.transforms.pop();
        if self.transforms.is_empty() {
            self.transforms.push(Transform::identity());
        }
    }

    /// Pre-concatenates `ts` onto the CTM: `CTM' = CTM * ts`.
    pub fn concat(&mut self, ts: &Transform) {
        if let Some(last) = self.transforms.last_mut() {
            *last = last.pre_concat(ts);
        }
    }

    /// Translates the canvas.
    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(&Transform::from_translate(tx, ty));
    }

    /// Scales the canvas.
    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&Transform::from_scale(sx, sy));
    }

    /// Rotates the canvas around the origin.
    #[inline]
    pub fn rotate(&mut self, radians: f32) {
        self.concat(&Transform::from_rotate(radians));
    }

    /// Fills the whole pixmap with `color`, ignoring the CTM and the
    /// blend mode (plain Source semantics).
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// Fills a rectangle.
    ///
    /// A pixel is filled when its center is inside the rect under the
    /// half-open convention: `center > min_edge && center <= max_edge`.
    pub fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.fill_rect_impl(rect, paint);
    }

    fn fill_rect_impl(&mut self, rect: Rect, paint: &Paint) -> Option<()> {
        let ctm = self.get_transform();

        // Transformed rects are just quads.
        if !ctm.is_identity() {
            let points = [
                Point::from_xy(rect.left, rect.top),
                Point::from_xy(rect.right, rect.top),
                Point::from_xy(rect.right, rect.bottom),
                Point::from_xy(rect.left, rect.bottom),
            ];
            return self.fill_convex_polygon_impl(&points, paint);
        }

        let mode = self.prepare(paint)?;

        // Identity CTM: rounding the rect implements the pixel-center
        // rule directly, no edges needed.
        let clipped = rect.round().intersect(&self.pixmap.rect());
        if clipped.is_empty() {
            return None;
        }

        self.with_source(paint, mode, ctm, &mut |blitter| {
            for y in clipped.top..clipped.bottom {
                blitter.blit_h(clipped.left, y, clipped.width());
            }
        })
    }

    /// Fills a convex polygon, following the same containment rule as
    /// rectangles.
    ///
    /// The polygon must be convex after transformation; results for
    /// non-convex input are unspecified.
    pub fn fill_convex_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.fill_convex_polygon_impl(points, paint);
    }

    fn fill_convex_polygon_impl(&mut self, points: &[Point], paint: &Paint) -> Option<()> {
        if points.len() < 3 {
            return None;
        }

        let mode = self.prepare(paint)?;
        let ctm = self.get_transform();

        let mut mapped = points.to_vec();
        ctm.map_points(&mut mapped);

        let clip = self.pixmap.rect().to_rect();
        let mut builder = EdgeBuilder::new(Some(clip));
        builder.push_polygon(&mapped);
        let mut edges = builder.finish();
        if edges.len() < 2 {
            return None;
        }

        edges.sort_by(|a, b| a.top.cmp(&b.top));

        self.with_source(paint, mode, ctm, &mut |blitter| {
            scan::convex::fill_edges(&edges, blitter);
        })
    }

    /// Fills a path using the non-zero winding rule.
    pub fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.fill_path_impl(path, paint);
    }

    fn fill_path_impl(&mut self, path: &Path, paint: &Paint) -> Option<()> {
        if path.is_empty() {
            return None;
        }

        let mode = self.prepare(paint)?;
        let ctm = self.get_transform();

        let path = path.transform(ctm);

        let bitmap_rect = self.pixmap.rect();
        let bounds = path.bounds();
        if bounds.rounds_outside(&bitmap_rect) {
            return None;
        }

        // Skip the clipper when the whole path fits the pixmap; curves
        // stay inside their control-point bounds, so this is sound.
        let clip = if bounds.rounds_inside(&bitmap_rect) {
            None
        } else {
            Some(bitmap_rect.to_rect())
        };

        let mut builder = EdgeBuilder::new(clip);
        builder.push_path(&path);
        let mut edges = builder.finish();

        self.with_source(paint, mode, ctm, &mut |blitter| {
            scan::path::fill_edges(&mut edges, blitter);
        })
    }

    /// Draws a mesh of triangles, with optional per-vertex colors and/or
    /// texture coordinates.
    ///
    /// Triangles are triples of `indices` into `verts` (and `colors`/
    /// `texs` when present). With colors only, vertex colors are
    /// interpolated; with texture coordinates only, the paint's shader is
    /// remapped per triangle; with both, the two are multiplied per
    /// pixel. Texture coordinates are ignored when the paint has no
    /// shader, and a mesh with neither colors nor usable texs draws
    /// nothing.
    pub fn draw_mesh(
        &mut self,
        verts: &[Point],
        colors: Option<&[Color]>,
        texs: Option<&[Point]>,
        indices: &[usize],
        paint: &Paint,
    ) {
        let texs = if paint.shader.is_some() { texs } else { None };

        match (colors, texs) {
            (Some(colors), Some(texs)) => {
                self.draw_mesh_modulating(verts, colors, texs, indices, paint)
            }
            (Some(colors), None) => self.draw_mesh_colors(verts, colors, indices, paint),
            (None, Some(texs)) => self.draw_mesh_texture(verts, texs, indices, paint),
            (None, None) => {}
        }
    }

    fn draw_mesh_colors(
        &mut self,
        verts: &[Point],
        colors: &[Color],
        indices: &[usize],
        paint: &Paint,
    ) {
        let shader = Rc::new(RefCell::new(TriangleColorShader::new(
            [Point::zero(); 3],
            [Color::TRANSPARENT; 3],
        )));

        let mut mesh_paint = paint.clone();
        let handle: SharedShader = shader.clone();
        mesh_paint.shader = Some(handle);

        for chunk in indices.chunks_exact(3) {
            let tri = match index_triple(chunk, verts.len().min(colors.len())) {
                Some(tri) => tri,
                None => continue,
            };

            let points = [verts[tri[0]], verts[tri[1]], verts[tri[2]]];
            shader.borrow_mut().update(
                points,
                [colors[tri[0]], colors[tri[1]], colors[tri[2]]],
            );
            self.fill_convex_polygon(&points, &mesh_paint);
        }
    }

    fn draw_mesh_texture(
        &mut self,
        verts: &[Point],
        texs: &[Point],
        indices: &[usize],
        paint: &Paint,
    ) {
        let base = match paint.shader {
            Some(ref shader) => shader.clone(),
            None => return,
        };

        let shader = Rc::new(RefCell::new(TriangleTextureShader::new(
            base,
            [Point::zero(); 3],
            [Point::zero(); 3],
        )));

        let mut mesh_paint = paint.clone();
        let handle: SharedShader = shader.clone();
        mesh_paint.shader = Some(handle);

        for chunk in indices.chunks_exact(3) {
            let tri = match index_triple(chunk, verts.len().min(texs.len())) {
                Some(tri) => tri,
                None => continue,
            };

            let points = [verts[tri[0]], verts[tri[1]], verts[tri[2]]];
            shader.borrow_mut().update(
                points,
                [texs[tri[0]], texs[tri[1]], texs[tri[2]]],
            );
            self.fill_convex_polygon(&points, &mesh_paint);
        }
    }

    fn draw_mesh_modulating(
        &mut self,
        verts: &[Point],
        colors: &[Color],
        texs: &[Point],
        indices: &[usize],
        paint: &Paint,
    ) {
        let base = match paint.shader {
            Some(ref shader) => shader.clone(),
            None => return,
        };

        let color_shader = Rc::new(RefCell::new(TriangleColorShader::new(
            [Point::zero(); 3],
            [Color::TRANSPARENT; 3],
        )));
        let texture_shader = Rc::new(RefCell::new(TriangleTextureShader::new(
            base,
            [Point::zero(); 3],
            [Point::zero(); 3],
        )));
        let shader = Rc::new(RefCell::new(TriangleModulatingShader::new(
            color_shader.clone(),
            texture_shader.clone(),
        )));

        let mut mesh_paint = paint.clone();
        let handle: SharedShader = shader;
        mesh_paint.shader = Some(handle);

        let limit = verts.len().min(colors.len()).min(texs.len());
        for chunk in indices.chunks_exact(3) {
            let tri = match index_triple(chunk, limit) {
                Some(tri) => tri,
                None => continue,
            };

            let points = [verts[tri[0]], verts[tri[1]], verts[tri[2]]];
            color_shader.borrow_mut().update(
                points,
                [colors[tri[0]], colors[tri[1]], colors[tri[2]]],
            );
            texture_shader.borrow_mut().update(
                points,
                [texs[tri[0]], texs[tri[1]], texs[tri[2]]],
            );
            self.fill_convex_polygon(&points, &mesh_paint);
        }
    }

    /// Draws a quad tessellated into a triangle mesh.
    ///
    /// Corners are given top-left, top-right, bottom-right, bottom-left.
    /// `level` controls tessellation: the quad is sampled bilinearly into
    /// an `(level + 2) x (level + 2)` vertex grid, producing
    /// `2 * (level + 1)^2` triangles, each sub-quad split along its
    /// top-right to bottom-left diagonal. Colors and texture coordinates
    /// are interpolated the same way and passed on to `draw_mesh`.
    pub fn draw_quad(
        &mut self,
        verts: &[Point; 4],
        colors: Option<&[Color; 4]>,
        texs: Option<&[Point; 4]>,
        level: u32,
        paint: &Paint,
    ) {
        let sub = (level + 1) as usize;
        let samples = (level + 2) as usize;

        let mut grid_verts = Vec::with_capacity(samples * samples);
        let mut grid_colors = colors.map(|_| Vec::with_capacity(samples * samples));
        let mut grid_texs = texs.map(|_| Vec::with_capacity(samples * samples));

        for row in 0..samples {
            for col in 0..samples {
                let u = col as f32 / sub as f32;
                let v = row as f32 / sub as f32;

                grid_verts.push(bilinear(verts, u, v, |p, w| p.scaled(w)));
                if let (Some(colors), Some(out)) = (colors, grid_colors.as_mut()) {
                    out.push(bilinear(colors, u, v, |c, w| c * w));
                }
                if let (Some(texs), Some(out)) = (texs, grid_texs.as_mut()) {
                    out.push(bilinear(texs, u, v, |p, w| p.scaled(w)));
                }
            }
        }

        let mut indices = Vec::with_capacity(sub * sub * 6);
        for row in 0..sub {
            for col in 0..sub {
                let top_left = row * samples + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + samples;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[top_left, top_right, bottom_left]);
                indices.extend_from_slice(&[top_right, bottom_right, bottom_left]);
            }
        }

        self.draw_mesh(
            &grid_verts,
            grid_colors.as_deref(),
            grid_texs.as_deref(),
            &indices,
            paint,
        );
    }

    /// Resolves the effective blend mode, or `None` when the draw is a
    /// whole no-op.
    fn prepare(&self, paint: &Paint) -> Option<BlendMode> {
        let mode = paint.simplified_blend_mode();
        if mode == BlendMode::Destination {
            None
        } else {
            Some(mode)
        }
    }

    /// Prepares the pixel source and runs `f` with a blitter for it.
    fn with_source(
        &mut self,
        paint: &Paint,
        mode: BlendMode,
        ctm: Transform,
        f: &mut dyn FnMut(&mut dyn Blitter),
    ) -> Option<()> {
        match paint.shader {
            Some(ref shader) => {
                let mut shader = shader.borrow_mut();
                if !shader.set_context(ctm) {
                    log::warn!("the paint transform is not invertible; nothing will be drawn");
                    return None;
                }

                blitter::with_blitter(
                    &mut self.pixmap,
                    mode,
                    BlitSource::Shader(&mut *shader),
                    f,
                );
            }
            None => {
                blitter::with_blitter(
                    &mut self.pixmap,
                    mode,
                    BlitSource::Solid(paint.color.premultiply()),
                    f,
                );
            }
        }

        Some(())
    }
}

/// Bilinear interpolation over the four quad corners, in the corner
/// order top-left, top-right, bottom-right, bottom-left.
fn bilinear<T, W>(corners: &[T; 4], u: f32, v: f32, weigh: W) -> T
where
    T: Copy + std::ops::Add<Output = T>,
    W: Fn(T, f32) -> T,
{
    weigh(corners[0], (1.0 - u) * (1.0 - v))
        + weigh(corners[1], u * (1.0 - v))
        + weigh(corners[3], (1.0 - u) * v)
        + weigh(corners[2], u * v)
}

fn index_triple(chunk: &[usize], limit: usize) -> Option<[usize; 3]> {
    let tri = [chunk[0], chunk[1], chunk[2]];
    if tri.iter().all(|i| *i < limit) {
        Some(tri)
    } else {
        None
    }
}
