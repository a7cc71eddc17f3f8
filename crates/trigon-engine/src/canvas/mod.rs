//! Host 2D drawing-surface API.
//!
//! [`Canvas2d`] mirrors the immediate-mode path API of a 2D canvas context:
//! style setters, path construction, `stroke`/`fill` and `clear_rect`.
//! Drawables are written against the trait; [`MeshCanvas`] is the
//! implementation the runtime presents through the mesh renderer.
//!
//! Coordinates are logical pixels, origin top-left, +Y down. Arc angles are
//! radians measured from +X and grow clockwise on screen.

mod mesh;
mod mesh_canvas;
mod path;

pub use mesh::{Mesh, MeshVertex};
pub use mesh_canvas::{MeshCanvas, Primitive};
pub use path::{Path2d, Subpath};

use crate::paint::Color;

/// Immediate-mode 2D drawing surface.
pub trait Canvas2d {
    /// Current surface width in logical pixels.
    fn width(&self) -> f32;

    /// Current surface height in logical pixels.
    fn height(&self) -> f32;

    /// Sets the stroke width. Non-positive or non-finite values are ignored.
    fn set_line_width(&mut self, width: f32);

    fn set_stroke_style(&mut self, color: Color);

    fn set_fill_style(&mut self, color: Color);

    /// Discards the current path.
    fn begin_path(&mut self);

    /// Starts a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f32, y: f32);

    /// Adds a straight segment to `(x, y)`.
    ///
    /// With no current point this behaves like [`move_to`](Self::move_to).
    fn line_to(&mut self, x: f32, y: f32);

    /// Adds a clockwise circular arc from `start` to `end` (radians).
    ///
    /// If a subpath is open, a straight segment joins its last point to the
    /// arc's start point. A sweep of at least `2π` draws a full circle.
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32);

    /// Closes the current subpath back to its first point.
    fn close_path(&mut self);

    /// Strokes the current path with the current stroke style and line width.
    fn stroke(&mut self);

    /// Fills the current path (non-zero rule, subpaths implicitly closed).
    fn fill(&mut self);

    /// Erases painted content that lies entirely inside the rect.
    ///
    /// Shapes that only partly overlap the rect are kept whole. A rect
    /// covering the surface erases everything.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}
