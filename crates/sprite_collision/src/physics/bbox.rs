//! World-space bounding boxes derived from an instance transform
//!
//! The box is the axis-aligned extent of the sprite's collision margins after
//! scale and rotation about the instance position. For rotated instances this
//! is the box *enclosing* the rotated rectangle, not the rotated rectangle
//! itself; rotated-rectangle tests use [`box_corners`] directly.

use crate::foundation::math::utils::{extents, is_unrotated, max, min, rotate_about};
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Collision margins in local pixel space; `right` and `bottom` are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BBoxMargins {
    /// First solid column
    pub left: i32,
    /// First solid row
    pub top: i32,
    /// Last solid column
    pub right: i32,
    /// Last solid row
    pub bottom: i32,
}

impl BBoxMargins {
    /// Margins from explicit edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Margins covering a whole `width` × `height` frame
    pub fn full(width: u32, height: u32) -> Self {
        let right = i32::try_from(width).unwrap_or(i32::MAX).saturating_sub(1);
        let bottom = i32::try_from(height).unwrap_or(i32::MAX).saturating_sub(1);
        Self::new(0, 0, right, bottom)
    }
}

/// Inputs that place a collision rectangle in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlacement {
    /// Instance position
    pub position: Vec2,
    /// Per-axis scale
    pub scale: Vec2,
    /// Rotation in degrees
    pub angle: f64,
    /// Sprite origin in local pixel space
    pub pivot: Vec2,
    /// Collision margins
    pub margins: BBoxMargins,
}

impl BoxPlacement {
    /// Unrotated edges as `(left, top, right, bottom)`, possibly mirrored by a negative scale
    fn unrotated_edges(&self) -> (f64, f64, f64, f64) {
        let Self { position, scale, pivot, margins, .. } = *self;
        let left = position.x + f64::from(margins.left) * scale.x - pivot.x * scale.x;
        let top = position.y + f64::from(margins.top) * scale.y - pivot.y * scale.y;
        let right = position.x + (f64::from(margins.right) + 1.0) * scale.x - pivot.x * scale.x;
        let bottom = position.y + (f64::from(margins.bottom) + 1.0) * scale.y - pivot.y * scale.y;
        (left, top, right, bottom)
    }
}

/// Corners of the collision rectangle in world space, rotated about the instance position.
///
/// Order is top-left, top-right, bottom-right, bottom-left before rotation, so
/// consecutive corners share an edge.
pub fn box_corners(placement: &BoxPlacement) -> [Vec2; 4] {
    let (left, top, right, bottom) = placement.unrotated_edges();
    [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(right, bottom),
        Vec2::new(left, bottom),
    ]
    .map(|corner| rotate_about(corner, placement.position, placement.angle))
}

/// Axis-aligned world-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Minimum x
    pub left: f64,
    /// Maximum x
    pub right: f64,
    /// Minimum y
    pub top: f64,
    /// Maximum y
    pub bottom: f64,
}

impl BBox {
    /// Box from edges as given
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    /// Box from two opposite corners in any order
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(min(x1, x2), min(y1, y2), max(x1, x2), max(y1, y2))
    }

    /// Degenerate box around a single point
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Compute the bounding box for a placement.
    ///
    /// Angles within `angle_epsilon` of a whole turn use the unrotated edges
    /// directly; anything else takes the extents of the rotated corners.
    pub fn compute(placement: &BoxPlacement, angle_epsilon: f64) -> Self {
        if is_unrotated(placement.angle, angle_epsilon) {
            let (left, top, right, bottom) = placement.unrotated_edges();
            return Self::from_corners(left, top, right, bottom);
        }

        let (lo, hi) = extents(&box_corners(placement));
        Self::new(lo.x, lo.y, hi.x, hi.y)
    }

    /// Width
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Corners clockwise from top-left (for debug drawing and SAT)
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right, self.top),
            Vec2::new(self.right, self.bottom),
            Vec2::new(self.left, self.bottom),
        ]
    }

    /// Closed-interval overlap: shared edges count
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// Query-rectangle reject with the half-pixel inflation used by rectangle queries.
    ///
    /// `self` is the query rectangle, `target` the collider's box.
    pub fn touches_half_pixel(&self, target: &Self) -> bool {
        self.left < target.right - 0.5
            && self.right > target.left + 0.5
            && self.top < target.bottom - 0.5
            && self.bottom > target.top + 0.5
    }

    /// Strict interior containment
    pub fn contains_strict(&self, x: f64, y: f64) -> bool {
        self.left < x && x < self.right && self.top < y && y < self.bottom
    }

    /// Euclidean length of the per-axis gaps between two boxes (zero when they overlap)
    pub fn gap_distance(&self, other: &Self) -> f64 {
        let dx = max(0.0, max(self.left, other.left) - min(self.right, other.right));
        let dy = max(0.0, max(self.top, other.top) - min(self.bottom, other.bottom));
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::ANGLE_EPSILON;
    use approx::assert_relative_eq;

    fn placement(x: f64, y: f64, angle: f64) -> BoxPlacement {
        BoxPlacement {
            position: Vec2::new(x, y),
            scale: Vec2::new(1.0, 1.0),
            angle,
            pivot: Vec2::new(8.0, 8.0),
            margins: BBoxMargins::new(2, 1, 13, 14),
        }
    }

    #[test]
    fn test_unrotated_matches_margin_formula() {
        let bbox = BBox::compute(&placement(100.0, 50.0, 0.0), ANGLE_EPSILON);

        assert_eq!(bbox.left, 100.0 + 2.0 - 8.0);
        assert_eq!(bbox.top, 50.0 + 1.0 - 8.0);
        assert_eq!(bbox.right, 100.0 + 14.0 - 8.0);
        assert_eq!(bbox.bottom, 50.0 + 15.0 - 8.0);
    }

    #[test]
    fn test_scaled_box() {
        let mut p = placement(0.0, 0.0, 0.0);
        p.scale = Vec2::new(2.0, 0.5);
        let bbox = BBox::compute(&p, ANGLE_EPSILON);

        assert_eq!(bbox.left, 2.0 * 2.0 - 8.0 * 2.0);
        assert_eq!(bbox.right, 14.0 * 2.0 - 8.0 * 2.0);
        assert_eq!(bbox.top, 0.5 - 4.0);
        assert_eq!(bbox.bottom, 7.5 - 4.0);
    }

    #[test]
    fn test_mirrored_box_is_normalised() {
        let mut p = placement(0.0, 0.0, 0.0);
        p.scale = Vec2::new(-1.0, 1.0);
        let bbox = BBox::compute(&p, ANGLE_EPSILON);

        assert_eq!(bbox.left, -6.0);
        assert_eq!(bbox.right, 6.0);
        assert!(bbox.left <= bbox.right);
    }

    #[test]
    fn test_full_turn_is_unrotated() {
        let straight = BBox::compute(&placement(10.0, 10.0, 0.0), ANGLE_EPSILON);
        let turned = BBox::compute(&placement(10.0, 10.0, 360.0), ANGLE_EPSILON);
        assert_eq!(straight, turned);
    }

    #[test]
    fn test_quarter_turn_encloses_rotated_corners() {
        // 16x16 full frame, pivot at the centre: a 90 degree turn maps the box onto itself
        let p = BoxPlacement {
            position: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            angle: 90.0,
            pivot: Vec2::new(8.0, 8.0),
            margins: BBoxMargins::full(16, 16),
        };
        let bbox = BBox::compute(&p, ANGLE_EPSILON);

        assert_relative_eq!(bbox.left, -8.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.right, 8.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.top, -8.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.bottom, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_diagonal_turn_grows_box() {
        let p = BoxPlacement {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            angle: 45.0,
            pivot: Vec2::new(5.0, 5.0),
            margins: BBoxMargins::full(10, 10),
        };
        let bbox = BBox::compute(&p, ANGLE_EPSILON);
        let half_diagonal = 5.0 * std::f64::consts::SQRT_2;

        assert_relative_eq!(bbox.left, -half_diagonal, epsilon = 1e-9);
        assert_relative_eq!(bbox.bottom, half_diagonal, epsilon = 1e-9);
    }

    #[test]
    fn test_overlap_scenarios() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&BBox::new(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_half_pixel_reject() {
        let target = BBox::new(0.0, 0.0, 10.0, 10.0);

        assert!(BBox::new(9.0, 0.0, 12.0, 10.0).touches_half_pixel(&target));
        assert!(!BBox::new(9.6, 0.0, 12.0, 10.0).touches_half_pixel(&target));
        assert!(!BBox::new(-3.0, 0.0, 0.5, 10.0).touches_half_pixel(&target));
    }

    #[test]
    fn test_gap_distance() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);

        assert_eq!(a.gap_distance(&BBox::new(5.0, 5.0, 15.0, 15.0)), 0.0);
        assert_eq!(a.gap_distance(&BBox::new(13.0, 0.0, 20.0, 10.0)), 3.0);
        assert_relative_eq!(a.gap_distance(&BBox::new(13.0, 14.0, 20.0, 20.0)), 5.0);
    }
}
