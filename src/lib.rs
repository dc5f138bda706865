/*!
`scanpaint` is a tiny software rasterizer.

It fills rectangles, convex polygons and winding-filled Bezier paths into an
in-memory pixmap of premultiplied 8-bit ARGB pixels, under an affine
transform stack, with the 12 Porter-Duff compositing modes and pluggable
row shaders (solid colors, bitmap patterns, gradients and per-triangle
interpolation for meshes).

Coverage is binary: a pixel is painted iff its center lies inside the
geometry. There is no antialiasing, stroking or text.
*/

#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::float_cmp)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod blend_mode;
mod blitter;
mod canvas;
mod color;
mod edge;
mod edge_builder;
mod edge_clipper;
mod floating_point;
mod painter;
mod path;
mod path_builder;
mod pixmap;
mod point;
mod rect;
mod scalar;
mod scan;
mod shaders;
mod transform;

pub use blend_mode::BlendMode;
pub use canvas::Canvas;
pub use color::{ALPHA_U8_TRANSPARENT, ALPHA_U8_OPAQUE};
pub use color::{Color, PremultipliedColorU8};
pub use painter::Paint;
pub use path::{Path, PathSegment, PathSegmentsIter, PathVerb};
pub use path_builder::{PathBuilder, PathDirection};
pub use pixmap::Pixmap;
pub use point::Point;
pub use rect::{IntRect, Rect};
pub use shaders::{Shader, SharedShader, SpreadMode};
pub use shaders::{ColorMatrix, ColorMatrixShader, LinearGradient, LinearPositionGradient};
pub use shaders::{Pattern, SweepGradient, VoronoiShader};
pub use shaders::{TriangleColorShader, TriangleModulatingShader, TriangleTextureShader};
pub use transform::Transform;
