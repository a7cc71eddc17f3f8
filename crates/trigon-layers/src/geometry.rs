//! Angle helpers for circle-based layout.
//!
//! Angles here are degrees, 0° at 12 o'clock, growing clockwise on screen
//! (+Y down).

use std::f64::consts::PI;

pub use trigon_engine::coords::Vec2 as Point;

/// Degrees to radians.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    (PI / 180.0 * degrees as f64) as f32
}

/// Point on the circle of `radius` around `(center_x, center_y)` at `degrees`.
///
/// `arc_pos(0, 0, 100, 0)` is `(0, -100)`; `90` is `(100, 0)`.
pub fn arc_pos(center_x: f32, center_y: f32, radius: f32, degrees: f32) -> Point {
    // f64 keeps large angles periodic to f32 precision.
    let rad = PI / 180.0 * degrees as f64;
    let r = radius as f64;
    Point::new(
        (center_x as f64 + rad.sin() * r) as f32,
        (center_y as f64 - rad.cos() * r) as f32,
    )
}

/// Wraps `degrees` into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0 in f32.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
