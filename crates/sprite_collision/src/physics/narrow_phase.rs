//! Narrow-phase intersection tests
//!
//! Every test is dispatched on the collider's [`SeparationMode`]. The edge
//! rules are deliberately uneven and must stay that way: rectangle queries
//! reject with a half-pixel inflation, collider pairs reject with closed
//! intervals, point tests are strict.

use super::bbox::{box_corners, BBox};
use super::collider::{Collider, SeparationMode};
use super::error::{CollisionError, NarrowTest};
use crate::foundation::math::utils::max;
use crate::foundation::math::Vec2;
use crate::instance::Instance;

/// Whether a collider pair needs the pixel-mask path rather than the box answer.
///
/// Both precise, or any mismatch of modes, goes to the masks.
///
/// | A \ B       | AxisAligned | Rotated | Precise |
/// |-------------|-------------|---------|---------|
/// | AxisAligned | box         | pixel   | pixel   |
/// | Rotated     | pixel       | box     | pixel   |
/// | Precise     | pixel       | pixel   | pixel   |
pub fn pair_needs_pixels(a: SeparationMode, b: SeparationMode) -> bool {
    a != b || a == SeparationMode::Precise
}

/// Point against a collider: strict interior of the bounding box.
///
/// Rotated rectangles, and precise masks when `precise` is requested, have no
/// point test and report [`CollisionError::Unsupported`].
pub fn point_vs_collider(
    collider: &Collider,
    owner: &Instance,
    point: Vec2,
    precise: bool,
    angle_epsilon: f64,
) -> Result<bool, CollisionError> {
    match collider.mode() {
        SeparationMode::AxisAlignedRect => {}
        SeparationMode::Precise if !precise => {}
        mode => return Err(CollisionError::Unsupported { test: NarrowTest::Point, mode }),
    }
    Ok(collider.bbox(owner, angle_epsilon).contains_strict(point.x, point.y))
}

/// Query rectangle against a collider
///
/// `rect` must already be normalised (`left <= right`, `top <= bottom`).
pub fn rect_vs_collider(
    collider: &mut Collider,
    owner: &Instance,
    rect: &BBox,
    precise: bool,
    angle_epsilon: f64,
) -> bool {
    let bbox = collider.bbox(owner, angle_epsilon);
    if !rect.touches_half_pixel(&bbox) {
        return false;
    }

    match collider.mode() {
        SeparationMode::AxisAlignedRect => true,
        SeparationMode::Precise if !precise => true,
        SeparationMode::RotatedRect => {
            let corners = box_corners(&collider.placement(owner));
            sat_rect_vs_quad(rect, &corners)
        }
        SeparationMode::Precise => collider
            .require_rotation(owner)
            .world_pixel_centres(owner.position)
            .any(|centre| rect.contains_strict(centre.x, centre.y)),
    }
}

/// Collider against collider
pub fn collider_vs_collider(
    a: &mut Collider,
    a_owner: &Instance,
    b: &mut Collider,
    b_owner: &Instance,
    angle_epsilon: f64,
) -> bool {
    let a_box = a.bbox(a_owner, angle_epsilon);
    let b_box = b.bbox(b_owner, angle_epsilon);
    if !a_box.overlaps(&b_box) {
        return false;
    }

    if !pair_needs_pixels(a.mode(), b.mode()) {
        return true;
    }

    let b_mask = b.require_rotation(b_owner);
    a.require_rotation(a_owner)
        .world_pixel_centres(a_owner.position)
        .any(|centre| b_mask.hit_world(b_owner.position, centre))
}

/// Segment against a collider's bounding box; there is no pixel-precise line test
pub fn line_vs_collider(
    collider: &Collider,
    owner: &Instance,
    start: Vec2,
    end: Vec2,
    angle_epsilon: f64,
) -> bool {
    segment_vs_box(&collider.bbox(owner, angle_epsilon), start, end)
}

/// Entry and exit parameters of a segment against one axis slab
fn slab(from: f64, to: f64, near: f64, far: f64) -> (f64, f64) {
    let delta = to - from;
    if delta == 0.0 {
        return (f64::NEG_INFINITY, f64::INFINITY);
    }
    let t_near = (near - from) / delta;
    let t_far = (far - from) / delta;
    (t_near.min(t_far), t_near.max(t_far))
}

/// Segment against an axis-aligned box with the slab method.
///
/// The exit parameter is the larger of the two axis exits, and a segment must
/// enter the box at `t >= 0` to count.
pub fn segment_vs_box(bbox: &BBox, start: Vec2, end: Vec2) -> bool {
    let outside = (start.x < bbox.left && end.x < bbox.left)
        || (start.x > bbox.right && end.x > bbox.right)
        || (start.y < bbox.top && end.y < bbox.top)
        || (start.y > bbox.bottom && end.y > bbox.bottom);
    if outside {
        return false;
    }

    let (x_close, x_far) = slab(start.x, end.x, bbox.left, bbox.right);
    let (y_close, y_far) = slab(start.y, end.y, bbox.top, bbox.bottom);
    let close = max(x_close, y_close);
    let far = max(x_far, y_far);
    close <= far && close >= 0.0
}

fn project(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(&axis);
        (lo.min(d), hi.max(d))
    })
}

/// Intervals overlap when either minimum lies inside the other closed range
fn intervals_overlap((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> bool {
    (min_a >= min_b && min_a <= max_b) || (min_b >= min_a && min_b <= max_a)
}

fn edge_normals(polygon: &[Vec2; 4]) -> [Vec2; 4] {
    std::array::from_fn(|i| {
        let edge = polygon[(i + 1) % 4] - polygon[i];
        Vec2::new(-edge.y, edge.x)
    })
}

/// Separating Axis Theorem test of an axis-aligned rectangle against a convex quad
pub fn sat_rect_vs_quad(rect: &BBox, quad: &[Vec2; 4]) -> bool {
    let rect_corners = rect.corners();
    edge_normals(&rect_corners)
        .into_iter()
        .chain(edge_normals(quad))
        .all(|axis| intervals_overlap(project(&rect_corners, axis), project(quad, axis)))
}
