use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, VertexBuffers,
};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{Canvas2d, Mesh, MeshVertex, Path2d};

/// One painted `stroke` or `fill`: its triangles plus the area they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub bounds: Rect,
    pub mesh: Mesh,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct CanvasState {
    line_width: f32,
    stroke_style: Color,
    fill_style: Color,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke_style: Color::BLACK,
            fill_style: Color::BLACK,
        }
    }
}

/// Retained-mode implementation of [`Canvas2d`].
///
/// Every `stroke`/`fill` is tessellated immediately into a [`Primitive`],
/// clipped to `(0, 0, width, height)`, and kept until a `clear_rect` covering
/// its bounds removes it. The renderer draws
/// the primitives in paint order each frame, so a surface that is painted once
/// stays on screen.
pub struct MeshCanvas {
    width: f32,
    height: f32,
    state: CanvasState,
    path: Path2d,
    primitives: Vec<Primitive>,

    fill_tessellator: FillTessellator,
    stroke_tessellator: StrokeTessellator,
}

impl MeshCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            state: CanvasState::default(),
            path: Path2d::new(),
            primitives: Vec::new(),
            fill_tessellator: FillTessellator::new(),
            stroke_tessellator: StrokeTessellator::new(),
        }
    }

    /// Painted primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_blank(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Appends all primitives to `out` in paint order.
    pub fn write_mesh(&self, out: &mut Mesh) {
        for prim in &self.primitives {
            out.extend_from(&prim.mesh);
        }
    }

    /// Keeps the part of a tessellated shape that lies on the surface.
    fn push_primitive(&mut self, buffers: VertexBuffers<MeshVertex, u32>) {
        let mut mesh = Mesh { vertices: buffers.vertices, indices: buffers.indices };
        let Some(mut bounds) = mesh_bounds(&mesh) else { return };

        let surface = Rect::new(0.0, 0.0, self.width, self.height);
        if !surface.encloses(bounds) {
            mesh = mesh.clipped(surface);
            let Some(clipped) = mesh_bounds(&mesh) else { return };
            bounds = clipped;
        }
        if mesh.is_empty() {
            return;
        }
        self.primitives.push(Primitive { bounds, mesh });
    }
}

impl Canvas2d for MeshCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke_style = color;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill_style = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(Vec2::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(Vec2::new(x, y));
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        self.path.arc(Vec2::new(cx, cy), radius, start, end);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn stroke(&mut self) {
        let Some(path) = build_lyon_path(&self.path, false) else { return };

        let width = self.state.line_width;
        let color = self.state.stroke_style.to_array();
        let options = StrokeOptions::default().with_line_width(width);

        let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
        let result = self.stroke_tessellator.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| MeshVertex {
                pos: vertex.position().to_array(),
                color,
            }),
        );

        if let Err(e) = result {
            log::debug!("stroke tessellation failed: {e:?}");
            return;
        }

        self.push_primitive(buffers);
    }

    fn fill(&mut self) {
        let Some(path) = build_lyon_path(&self.path, true) else { return };

        let color = self.state.fill_style.to_array();
        let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
        let result = self.fill_tessellator.tessellate_path(
            &path,
            &FillOptions::non_zero(),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| MeshVertex {
                pos: vertex.position().to_array(),
                color,
            }),
        );

        if let Err(e) = result {
            log::debug!("fill tessellation failed: {e:?}");
            return;
        }

        self.push_primitive(buffers);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let area = Rect::new(x, y, width, height);
        if !area.is_finite() {
            return;
        }
        self.primitives.retain(|prim| !area.encloses(prim.bounds));
    }
}

/// Area actually covered by the triangles of `mesh`.
fn mesh_bounds(mesh: &Mesh) -> Option<Rect> {
    if mesh.is_empty() {
        return None;
    }
    Rect::bounding(mesh.vertices.iter().map(|v| Vec2::new(v.pos[0], v.pos[1])))
}

/// Converts a canvas path into a lyon path.
///
/// Subpaths with fewer than two points cannot produce geometry and are skipped.
/// Returns `None` when nothing drawable remains or any point is non-finite.
fn build_lyon_path(path: &Path2d, force_close: bool) -> Option<Path> {
    if path.is_empty() {
        return None;
    }
    let mut builder = Path::builder();
    let mut any = false;

    for sub in path.subpaths() {
        if sub.points.len() < 2 {
            continue;
        }
        if !sub.points.iter().all(|p| p.is_finite()) {
            return None;
        }

        let first = sub.points[0];
        builder.begin(point(first.x, first.y));
        for p in &sub.points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(force_close || sub.closed);
        any = true;
    }

    any.then(|| builder.build())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;

    fn triangle_path(c: &mut MeshCanvas) {
        c.begin_path();
        c.move_to(50.0, 10.0);
        c.line_to(90.0, 80.0);
        c.line_to(10.0, 80.0);
        c.line_to(50.0, 10.0);
    }

    #[test]
    fn stroke_and_fill_each_record_a_primitive() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        triangle_path(&mut c);
        c.stroke();
        c.fill();
        assert_eq!(c.primitives().len(), 2);
        assert!(c.primitives().iter().all(|p| !p.mesh.is_empty()));
    }

    #[test]
    fn fill_uses_fill_style_and_stroke_uses_stroke_style() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        let yellow = Color::parse_css("rgba(255,255,0,.3)").unwrap();
        c.set_fill_style(yellow);
        c.set_stroke_style(Color::BLACK);
        triangle_path(&mut c);
        c.stroke();
        c.fill();

        let stroke = &c.primitives()[0].mesh;
        let fill = &c.primitives()[1].mesh;
        assert!(stroke.vertices.iter().all(|v| v.color == Color::BLACK.to_array()));
        assert!(fill.vertices.iter().all(|v| v.color == yellow.to_array()));
    }

    #[test]
    fn stroke_bounds_cover_the_line_width() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.set_line_width(4.0);
        c.begin_path();
        c.move_to(10.0, 50.0);
        c.line_to(90.0, 50.0);
        c.stroke();
        assert_eq!(c.primitives()[0].bounds, Rect::new(10.0, 48.0, 80.0, 4.0));
    }

    #[test]
    fn invalid_line_width_is_ignored() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.set_line_width(2.0);
        c.set_line_width(0.0);
        c.set_line_width(f32::NAN);
        c.begin_path();
        c.move_to(10.0, 50.0);
        c.line_to(90.0, 50.0);
        c.stroke();
        assert_eq!(c.primitives()[0].bounds.size.y, 2.0);
    }

    #[test]
    fn full_clear_removes_everything() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        triangle_path(&mut c);
        c.stroke();
        c.fill();
        c.clear_rect(0.0, 0.0, c.width(), c.height());
        assert!(c.is_blank());
    }

    #[test]
    fn overhanging_content_is_clipped_then_cleared() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.move_to(-20.0, 50.0);
        c.line_to(150.0, 50.0);
        c.stroke();
        assert_eq!(c.primitives()[0].bounds, Rect::new(0.0, 49.5, 100.0, 1.0));

        c.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert!(c.is_blank());
    }

    #[test]
    fn painting_stays_inside_the_surface() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.move_to(50.0, 50.0);
        c.line_to(400.0, 50.0);
        c.line_to(50.0, 400.0);
        c.fill();
        c.stroke();

        assert_eq!(c.primitives().len(), 2);
        let mut mesh = Mesh::new();
        c.write_mesh(&mut mesh);
        for v in &mesh.vertices {
            assert!((0.0..=100.0).contains(&v.pos[0]), "{v:?}");
            assert!((0.0..=100.0).contains(&v.pos[1]), "{v:?}");
        }
    }

    #[test]
    fn painting_off_the_surface_records_nothing() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.arc(300.0, 300.0, 20.0, 0.0, TAU);
        c.fill();
        c.stroke();
        assert!(c.is_blank());
    }

    #[test]
    fn partial_clear_keeps_primitives_outside() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.move_to(5.0, 5.0);
        c.line_to(20.0, 5.0);
        c.stroke();
        c.begin_path();
        c.move_to(60.0, 60.0);
        c.line_to(90.0, 60.0);
        c.stroke();

        c.clear_rect(0.0, 0.0, 50.0, 50.0);
        assert_eq!(c.primitives().len(), 1);
        assert!(c.primitives()[0].bounds.origin.x > 50.0);
    }

    #[test]
    fn partial_overlap_survives_clear() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.move_to(10.0, 50.0);
        c.line_to(90.0, 50.0);
        c.stroke();

        c.clear_rect(0.0, 0.0, 60.0, 100.0);
        assert_eq!(c.primitives().len(), 1);
        assert_eq!(c.primitives()[0].bounds.origin.x, 10.0);
    }

    #[test]
    fn begin_path_discards_previous_path() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.move_to(0.0, 0.0);
        c.line_to(100.0, 100.0);
        c.begin_path();
        c.stroke();
        assert!(c.is_blank());
    }

    #[test]
    fn single_point_paths_paint_nothing() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        c.begin_path();
        c.move_to(10.0, 10.0);
        c.stroke();
        c.fill();
        assert!(c.is_blank());
    }

    #[test]
    fn stroked_circle_bounds_match_radius() {
        let mut c = MeshCanvas::new(500.0, 500.0);
        c.set_line_width(0.5);
        c.begin_path();
        c.arc(250.0, 250.0, 200.0, 0.0, TAU);
        c.stroke();
        let b = c.primitives()[0].bounds;
        assert!((b.origin.x - 49.75).abs() < 0.01);
        assert!((b.size.x - 400.5).abs() < 0.01);
    }

    #[test]
    fn write_mesh_concatenates_in_paint_order() {
        let mut c = MeshCanvas::new(100.0, 100.0);
        triangle_path(&mut c);
        c.stroke();
        c.fill();
        let mut out = Mesh::new();
        c.write_mesh(&mut out);
        let expected: usize = c.primitives().iter().map(|p| p.mesh.vertices.len()).sum();
        assert_eq!(out.vertices.len(), expected);
        assert_eq!(out.vertices[0], c.primitives()[0].mesh.vertices[0]);
    }
}
