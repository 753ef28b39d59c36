//! Math utilities and types
//!
//! Provides the 2D geometry kernel shared by the bounding box, mask rotation
//! and narrow-phase code. Everything is `f64` because room coordinates and
//! sub-pixel positions must survive repeated rotation without drift.

pub use nalgebra::Vector2;

/// 2D vector type (world or local pixel space)
pub type Vec2 = Vector2<f64>;

/// Math constants
pub mod constants {
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

    /// Tolerance used when snapping transformed coordinates to whole pixels.
    ///
    /// `cos(90°)` evaluates to roughly `6e-17` rather than zero; without the
    /// snap a corner sitting exactly on a pixel edge would grow the grid by one.
    pub const SNAP_EPSILON: f64 = 1e-9;

    /// Default tolerance for treating an angle as "not rotated".
    pub const ANGLE_EPSILON: f64 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants::{DEG_TO_RAD, SNAP_EPSILON};
    use super::Vec2;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * DEG_TO_RAD
    }

    /// Smaller of two floats
    pub fn min(a: f64, b: f64) -> f64 {
        a.min(b)
    }

    /// Larger of two floats
    pub fn max(a: f64, b: f64) -> f64 {
        a.max(b)
    }

    /// Returns true when `degrees` is a whole number of turns, within `epsilon`.
    pub fn is_unrotated(degrees: f64, epsilon: f64) -> bool {
        let wrapped = degrees.rem_euclid(360.0);
        wrapped <= epsilon || 360.0 - wrapped <= epsilon
    }

    /// Floor to an integer, absorbing floating point residue just below a whole number.
    pub fn floor_to_int(value: f64) -> i64 {
        (value + SNAP_EPSILON).floor() as i64
    }

    /// Ceil to an integer, absorbing floating point residue just above a whole number.
    pub fn ceil_to_int(value: f64) -> i64 {
        (value - SNAP_EPSILON).ceil() as i64
    }

    /// Rotate `point` about `pivot` by `degrees`.
    ///
    /// Positive angles turn counter-clockwise on a y-down screen, which is the
    /// standard rotation matrix applied with the negated angle.
    pub fn rotate_about(point: Vec2, pivot: Vec2, degrees: f64) -> Vec2 {
        let (sin, cos) = deg_to_rad(degrees).sin_cos();
        let d = point - pivot;
        Vec2::new(
            pivot.x + d.x * cos + d.y * sin,
            pivot.y - d.x * sin + d.y * cos,
        )
    }

    /// Component-wise min and max over a set of points.
    ///
    /// Returns `(min, max)`; an empty slice yields an inverted infinite box.
    pub fn extents(points: &[Vec2]) -> (Vec2, Vec2) {
        points.iter().fold(
            (
                Vec2::new(f64::INFINITY, f64::INFINITY),
                Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(lo, hi), p| {
                (
                    Vec2::new(min(lo.x, p.x), min(lo.y, p.y)),
                    Vec2::new(max(hi.x, p.x), max(hi.y, p.y)),
                )
            },
        )
    }
}
