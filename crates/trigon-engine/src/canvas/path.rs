use std::f32::consts::TAU;

use crate::coords::Vec2;

/// Maximum distance between a flattened arc chord and the true circle, in logical px.
const ARC_TOLERANCE: f32 = 0.1;
const MAX_ARC_SEGMENTS: usize = 512;

/// A polyline subpath.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subpath {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// Current path of a canvas: a list of flattened subpaths.
///
/// Arcs are flattened at insertion time so consumers only ever see polylines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path2d {
    subpaths: Vec<Subpath>,
}

impl Path2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.is_empty())
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.subpaths.push(Subpath { points: vec![p], closed: false });
    }

    pub fn line_to(&mut self, p: Vec2) {
        match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(p),
            _ => self.move_to(p),
        }
    }

    /// Closes the open subpath. A following `line_to` starts a new subpath
    /// at the closed subpath's first point.
    pub fn close(&mut self) {
        let Some(sub) = self.subpaths.last_mut() else { return };
        if sub.closed {
            return;
        }
        sub.closed = true;
        if let Some(&first) = sub.points.first() {
            self.subpaths.push(Subpath { points: vec![first], closed: false });
        }
    }

    /// Appends a flattened clockwise arc.
    ///
    /// Non-finite input is ignored. A non-positive radius collapses the arc to
    /// its center point.
    pub fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        if !center.is_finite() || !radius.is_finite() || !start.is_finite() || !end.is_finite() {
            return;
        }

        if radius <= 0.0 {
            self.line_to(center);
            return;
        }

        let sweep = arc_sweep(start, end);
        let segments = arc_segment_count(radius, sweep);

        for i in 0..=segments {
            let t = start + sweep * (i as f32 / segments as f32);
            let p = Vec2::new(center.x + radius * t.cos(), center.y + radius * t.sin());
            self.line_to(p);
        }
    }
}

/// Clockwise sweep from `start` to `end`, in `[0, 2π]`.
fn arc_sweep(start: f32, end: f32) -> f32 {
    let delta = end - start;
    if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

fn arc_segment_count(radius: f32, sweep: f32) -> usize {
    if sweep <= 0.0 {
        return 1;
    }
    // Chord sagitta r·(1 - cos(θ/2)) <= tolerance.
    let step = if radius <= ARC_TOLERANCE {
        std::f32::consts::FRAC_PI_2
    } else {
        2.0 * (1.0 - ARC_TOLERANCE / radius).acos()
    };
    ((sweep / step).ceil() as usize).clamp(4, MAX_ARC_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn line_to_without_current_point_starts_subpath() {
        let mut p = Path2d::new();
        p.line_to(Vec2::new(1.0, 2.0));
        p.line_to(Vec2::new(3.0, 4.0));
        assert_eq!(p.subpaths().len(), 1);
        assert_eq!(p.subpaths()[0].points.len(), 2);
    }

    #[test]
    fn move_to_starts_new_subpath() {
        let mut p = Path2d::new();
        p.move_to(Vec2::new(0.0, 0.0));
        p.line_to(Vec2::new(1.0, 0.0));
        p.move_to(Vec2::new(5.0, 5.0));
        assert_eq!(p.subpaths().len(), 2);
        assert_eq!(p.subpaths()[1].points, vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn close_marks_subpath_and_reopens_at_start() {
        let mut p = Path2d::new();
        p.move_to(Vec2::new(0.0, 0.0));
        p.line_to(Vec2::new(10.0, 0.0));
        p.line_to(Vec2::new(10.0, 10.0));
        p.close();
        assert!(p.subpaths()[0].closed);
        assert_eq!(p.subpaths()[1].points, vec![Vec2::new(0.0, 0.0)]);
        assert!(!p.subpaths()[1].closed);
    }

    #[test]
    fn arc_starts_new_subpath_on_empty_path() {
        let mut p = Path2d::new();
        p.arc(Vec2::new(0.0, 0.0), 10.0, 0.0, std::f32::consts::PI);
        let sub = &p.subpaths()[0];
        assert!(approx(sub.points[0], Vec2::new(10.0, 0.0)));
        assert!(approx(*sub.points.last().unwrap(), Vec2::new(-10.0, 0.0)));
        // Clockwise on screen passes through +Y.
        assert!(sub.points.iter().any(|p| p.y > 9.0));
    }

    #[test]
    fn arc_joins_open_subpath() {
        let mut p = Path2d::new();
        p.move_to(Vec2::new(-50.0, -50.0));
        p.arc(Vec2::new(0.0, 0.0), 10.0, 0.0, TAU);
        assert_eq!(p.subpaths().len(), 1);
        assert!(approx(p.subpaths()[0].points[1], Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn full_arc_points_lie_on_circle() {
        let mut p = Path2d::new();
        p.arc(Vec2::new(5.0, 5.0), 100.0, 0.0, TAU);
        let pts = &p.subpaths()[0].points;
        assert!(pts.len() > 16);
        assert!(pts.iter().all(|q| (q.distance(Vec2::new(5.0, 5.0)) - 100.0).abs() < 1e-2));
        assert!(approx(pts[0], *pts.last().unwrap()));
    }

    #[test]
    fn degenerate_arcs_do_not_panic() {
        let mut p = Path2d::new();
        p.arc(Vec2::new(1.0, 1.0), 0.0, 0.0, TAU);
        p.arc(Vec2::new(1.0, 1.0), -4.0, 0.0, TAU);
        p.arc(Vec2::new(f32::NAN, 1.0), 4.0, 0.0, TAU);
        let count: usize = p.subpaths().iter().map(|s| s.points.len()).sum();
        assert_eq!(count, 2);
    }
}
