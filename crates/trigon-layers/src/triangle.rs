use std::f32::consts::TAU;

use trigon_engine::canvas::Canvas2d;
use trigon_engine::paint::Color;

use crate::drawable::Drawable;
use crate::geometry::{arc_pos, wrap_degrees, Point};

const GUIDE_LINE_WIDTH: f32 = 0.5;
const GUIDE_CENTER_RADIUS: f32 = 2.0;
const GUIDE_TICK_RADIUS: f32 = 4.0;
const GUIDE_TICK_STEP: usize = 30;

/// Rotating equilateral triangle settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleConfig {
    /// Added to the render position to get the center.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Circumradius.
    pub radius: f32,
    /// Initial rotation in degrees; 0 puts the first vertex at 12 o'clock.
    pub angle: f32,
    /// Fill color.
    pub color: Color,
    pub line_width: f32,
    pub stroke_style: Color,
    /// Degrees added per rendered frame. Negative turns counter-clockwise.
    pub rotation_speed: f32,
    /// Draws the circumscribing circle, its center and 30° ticks in red.
    pub show_guides: bool,
}

impl Default for TriangleConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            radius: 100.0,
            angle: 0.0,
            // rgba(255, 255, 0, .3)
            color: Color::from_srgb(1.0, 1.0, 0.0, 0.3),
            line_width: 1.0,
            stroke_style: Color::BLACK,
            rotation_speed: 0.0,
            show_guides: false,
        }
    }
}

/// Vertices of an equilateral triangle, clockwise from `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePoints {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

/// Vertices at `rotation`, `rotation + 120` and `rotation + 240` degrees on
/// the circle of `radius` around `(cx, cy)`.
pub fn triangle_points(cx: f32, cy: f32, radius: f32, rotation: f32) -> TrianglePoints {
    TrianglePoints {
        a: arc_pos(cx, cy, radius, rotation),
        b: arc_pos(cx, cy, radius, rotation + 120.0),
        c: arc_pos(cx, cy, radius, rotation + 240.0),
    }
}

/// A triangle that turns by `rotation_speed` degrees every time it is drawn.
#[derive(Debug, Clone)]
pub struct Triangle {
    config: TriangleConfig,
    angle: f32,
}

impl Triangle {
    pub fn new(config: TriangleConfig) -> Self {
        let angle = if config.angle.is_finite() { wrap_degrees(config.angle) } else { 0.0 };
        Self { config, angle }
    }

    pub fn config(&self) -> &TriangleConfig {
        &self.config
    }

    /// Current rotation in `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn points(&self, x: f32, y: f32) -> TrianglePoints {
        let (cx, cy) = self.center(x, y);
        triangle_points(cx, cy, self.config.radius, self.angle)
    }

    /// Advances the rotation by one frame.
    pub fn step(&mut self) {
        let next = self.angle + self.config.rotation_speed;
        if next.is_finite() {
            self.angle = wrap_degrees(next);
        }
    }

    fn center(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.config.offset_x, y + self.config.offset_y)
    }

    fn draw_guides(&self, surface: &mut dyn Canvas2d, cx: f32, cy: f32) {
        let radius = self.config.radius;

        surface.set_line_width(GUIDE_LINE_WIDTH);
        surface.set_stroke_style(Color::from_srgb_u8(0xff, 0, 0, 0xff));

        circle(surface, cx, cy, GUIDE_CENTER_RADIUS);
        circle(surface, cx, cy, radius);

        for deg in (0..360).step_by(GUIDE_TICK_STEP) {
            let p = arc_pos(cx, cy, radius, deg as f32);
            circle(surface, p.x, p.y, GUIDE_TICK_RADIUS);
        }
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(TriangleConfig::default())
    }
}

fn circle(surface: &mut dyn Canvas2d, cx: f32, cy: f32, radius: f32) {
    surface.begin_path();
    surface.arc(cx, cy, radius, 0.0, TAU);
    surface.stroke();
}

impl Drawable for Triangle {
    fn render(&mut self, surface: &mut dyn Canvas2d, x: f32, y: f32) {
        let (cx, cy) = self.center(x, y);
        let TrianglePoints { a, b, c } = triangle_points(cx, cy, self.config.radius, self.angle);

        surface.set_line_width(self.config.line_width);
        surface.set_stroke_style(self.config.stroke_style);
        surface.set_fill_style(self.config.color);

        surface.begin_path();
        surface.move_to(a.x, a.y);
        surface.line_to(b.x, b.y);
        surface.line_to(c.x, c.y);
        surface.line_to(a.x, a.y);
        surface.stroke();
        surface.fill();

        if self.config.show_guides {
            self.draw_guides(surface, cx, cy);
        }

        self.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingCanvas};

    fn spinning(angle: f32, rotation_speed: f32) -> Triangle {
        Triangle::new(TriangleConfig { angle, rotation_speed, ..Default::default() })
    }

    #[test]
    fn vertices_are_equidistant_from_center() {
        let pts = triangle_points(250.0, 250.0, 100.0, 17.0);
        let center = Point::new(250.0, 250.0);
        for p in [pts.a, pts.b, pts.c] {
            assert!((p.distance(center) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn vertices_are_120_degrees_apart() {
        let pts = triangle_points(0.0, 0.0, 100.0, 0.0);
        // Equilateral: every side is r·√3.
        let side = 100.0 * 3f32.sqrt();
        assert!((pts.a.distance(pts.b) - side).abs() < 1e-2);
        assert!((pts.b.distance(pts.c) - side).abs() < 1e-2);
        assert!((pts.c.distance(pts.a) - side).abs() < 1e-2);
        assert!((pts.a.x).abs() < 1e-4 && (pts.a.y + 100.0).abs() < 1e-4);
    }

    #[test]
    fn negative_speed_wraps_to_top_of_range() {
        let mut t = spinning(180.0, -2.0);
        for _ in 0..91 {
            t.step();
        }
        assert_eq!(t.angle(), 358.0);
    }

    #[test]
    fn angle_after_n_steps() {
        for (initial, speed) in [(0.0, 0.25), (180.0, -1.0), (0.0, 3.0), (45.0, 7.5)] {
            let mut t = spinning(initial, speed);
            for n in 1..=500 {
                t.step();
                let expected = (initial + n as f32 * speed).rem_euclid(360.0);
                let a = t.angle();
                assert!((0.0..360.0).contains(&a));
                let diff = (a - expected).abs();
                assert!(diff < 1e-2 || (360.0 - diff) < 1e-2, "n={n}: {a} vs {expected}");
            }
        }
    }

    #[test]
    fn initial_angle_is_wrapped() {
        assert_eq!(spinning(-90.0, 0.0).angle(), 270.0);
        assert_eq!(spinning(720.0, 0.0).angle(), 0.0);
        assert_eq!(spinning(f32::NAN, 0.0).angle(), 0.0);
    }

    #[test]
    fn non_finite_speed_keeps_angle() {
        let mut t = spinning(10.0, f32::INFINITY);
        t.step();
        assert_eq!(t.angle(), 10.0);
    }

    #[test]
    fn render_strokes_open_outline_then_fills() {
        let mut canvas = RecordingCanvas::new(500.0, 500.0);
        let mut t = Triangle::default();
        let pts = t.points(250.0, 250.0);
        t.render(&mut canvas, 250.0, 250.0);

        let cfg = TriangleConfig::default();
        assert_eq!(
            canvas.ops,
            vec![
                Op::LineWidth(1.0),
                Op::StrokeStyle(cfg.stroke_style),
                Op::FillStyle(cfg.color),
                Op::BeginPath,
                Op::MoveTo(pts.a.x, pts.a.y),
                Op::LineTo(pts.b.x, pts.b.y),
                Op::LineTo(pts.c.x, pts.c.y),
                Op::LineTo(pts.a.x, pts.a.y),
                Op::Stroke,
                Op::Fill,
            ]
        );
    }

    #[test]
    fn render_advances_once() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        let mut t = spinning(0.0, 3.0);
        t.render(&mut canvas, 0.0, 0.0);
        t.render(&mut canvas, 0.0, 0.0);
        assert_eq!(t.angle(), 6.0);
    }

    #[test]
    fn offset_moves_center() {
        let t = Triangle::new(TriangleConfig { offset_x: 10.0, offset_y: -5.0, ..Default::default() });
        let pts = t.points(100.0, 100.0);
        assert!((pts.a.x - 110.0).abs() < 1e-4);
        assert!((pts.a.y - (95.0 - 100.0)).abs() < 1e-4);
    }

    #[test]
    fn guides_draw_center_circle_and_twelve_ticks() {
        let mut canvas = RecordingCanvas::new(500.0, 500.0);
        let mut t = Triangle::new(TriangleConfig { radius: 200.0, show_guides: true, ..Default::default() });
        t.render(&mut canvas, 250.0, 250.0);

        let arcs: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match *op {
                Op::Arc { cx, cy, r, .. } => Some((cx, cy, r)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 14);
        assert_eq!(arcs[0], (250.0, 250.0, 2.0));
        assert_eq!(arcs[1], (250.0, 250.0, 200.0));
        assert!(arcs[2..].iter().all(|&(_, _, r)| r == 4.0));
        // First tick sits at 12 o'clock.
        assert!((arcs[2].0 - 250.0).abs() < 1e-3 && (arcs[2].1 - 50.0).abs() < 1e-3);

        assert!(canvas.ops.contains(&Op::LineWidth(0.5)));
        assert!(canvas.ops.contains(&Op::StrokeStyle(Color::from_srgb_u8(0xff, 0, 0, 0xff))));
        // Triangle stroke + fill, then one stroke per guide circle.
        assert_eq!(canvas.count(|op| matches!(op, Op::Stroke)), 15);
    }

    #[test]
    fn zero_radius_still_renders_and_steps() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        let mut t = Triangle::new(TriangleConfig { radius: 0.0, rotation_speed: 1.0, ..Default::default() });
        t.render(&mut canvas, 5.0, 5.0);
        assert!(canvas.ops.contains(&Op::MoveTo(5.0, 5.0)));
        assert_eq!(t.angle(), 1.0);
    }
}
