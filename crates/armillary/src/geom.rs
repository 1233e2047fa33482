//! Planar angle helpers.
//!
//! Angles follow the drawing-surface convention: measured from the positive
//! x-axis, increasing toward positive y. With y growing downward that reads
//! as clockwise on screen.

use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset of this point from `origin`.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Remainder of `n / m` shifted into `[0, m)`.
///
/// The native `%` keeps the sign of `n`; comparisons on ring angles need
/// the canonical non-negative representative.
///
/// # Panics
///
/// Panics if `m` is not positive.
pub fn positive_mod(n: f64, m: f64) -> f64 {
    assert!(m > 0.0, "modulus must be positive, got {m}");
    ((n % m) + m) % m
}

/// Angle of the vector `(x, y)` in radians, in `[0, TAU)`.
pub fn vector_angle(x: f64, y: f64) -> f64 {
    positive_mod(y.atan2(x), TAU)
}
