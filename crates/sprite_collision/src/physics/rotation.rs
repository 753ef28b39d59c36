//! Mask Rotation Engine
//!
//! Resamples a local, unrotated mask into a world-oriented mask for a given
//! scale and angle. The forward transform (used only to size the output) is
//! scale-then-rotate about the pivot; each output cell centre is pulled back
//! through the inverse, rotate-then-unscale, and reads the source cell it
//! lands in.
//!
//! Results are never refreshed automatically. Whoever changes a sprite, mask
//! frame, scale or angle that matters for pixel-precise collision must ask the
//! collision world to rebuild or invalidate the cached mask.

use super::mask::CollisionMask;
use crate::foundation::math::utils::{ceil_to_int, extents, floor_to_int, rotate_about};
use crate::foundation::math::Vec2;

/// What a resampled cell reads when its source point falls outside the source grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePolicy {
    /// Treat anything outside the source (or not a finite coordinate) as an empty pixel
    #[default]
    OutsideIsEmpty,
}

impl SamplePolicy {
    /// Read `source` at a continuous source-space point
    pub fn sample(self, source: &CollisionMask, point: Vec2) -> bool {
        match self {
            Self::OutsideIsEmpty => {
                if !point.x.is_finite() || !point.y.is_finite() {
                    return false;
                }
                source.sample(point.x.floor() as i64, point.y.floor() as i64)
            }
        }
    }
}

/// World-oriented mask plus where its top-left cell sits relative to the pivot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RotatedMask {
    /// Resampled grid
    pub mask: CollisionMask,
    /// Top-left corner of `mask` relative to the instance position
    pub offset: Vec2,
}

impl RotatedMask {
    /// World position of the top-left corner of cell (0, 0)
    pub fn world_origin(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }

    /// World-space centre of every set cell
    pub fn world_pixel_centres(&self, position: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        let origin = self.world_origin(position);
        self.mask
            .set_pixels()
            .map(move |(x, y)| origin + Vec2::new(x as f64 + 0.5, y as f64 + 0.5))
    }

    /// Whether the cell under world point `point` is set
    pub fn hit_world(&self, position: Vec2, point: Vec2) -> bool {
        let local = point - self.world_origin(position);
        SamplePolicy::OutsideIsEmpty.sample(&self.mask, local)
    }
}

fn scale_then_rotate(point: Vec2, pivot: Vec2, scale: Vec2, angle: f64) -> Vec2 {
    let scaled = (point - pivot).component_mul(&scale);
    rotate_about(scaled, Vec2::zeros(), angle) + pivot
}

fn unrotate_then_unscale(point: Vec2, pivot: Vec2, inverse_scale: Vec2, angle: f64) -> Vec2 {
    let unrotated = rotate_about(point - pivot, Vec2::zeros(), -angle);
    unrotated.component_mul(&inverse_scale) + pivot
}

/// Cell counts spanned by integer extents, or `None` when the span or the area overflows
fn grid_size(min_x: i64, max_x: i64, min_y: i64, max_y: i64) -> Option<(usize, usize)> {
    let width = usize::try_from(max_x.checked_sub(min_x)?).unwrap_or(0);
    let height = usize::try_from(max_y.checked_sub(min_y)?).unwrap_or(0);
    width.checked_mul(height)?;
    Some((width, height))
}

/// Resample `source` for `scale` and `angle` (degrees) about `pivot`
pub fn rotate_mask(source: &CollisionMask, pivot: Vec2, scale: Vec2, angle: f64) -> RotatedMask {
    let width = source.width() as f64;
    let height = source.height() as f64;
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
    .map(|corner| scale_then_rotate(corner, pivot, scale, angle));

    let (lo, hi) = extents(&corners);
    if ![lo.x, lo.y, hi.x, hi.y].iter().all(|v| v.is_finite()) {
        log::warn!("Mask rotation with non-finite transform (scale {:?}, angle {})", scale, angle);
        return RotatedMask::default();
    }

    let min_x = floor_to_int(lo.x);
    let min_y = floor_to_int(lo.y);
    let max_x = ceil_to_int(hi.x);
    let max_y = ceil_to_int(hi.y);
    let Some((out_width, out_height)) = grid_size(min_x, max_x, min_y, max_y) else {
        log::warn!("Mask rotation output overflows (scale {:?}, angle {})", scale, angle);
        return RotatedMask::default();
    };

    let inverse_scale = Vec2::new(1.0 / scale.x, 1.0 / scale.y);
    let policy = SamplePolicy::OutsideIsEmpty;
    let mut mask = CollisionMask::new(out_width, out_height);
    for y in 0..out_height {
        for x in 0..out_width {
            let centre = Vec2::new(
                (min_x + x as i64) as f64 + 0.5,
                (min_y + y as i64) as f64 + 0.5,
            );
            let source_point = unrotate_then_unscale(centre, pivot, inverse_scale, angle);
            if policy.sample(source, source_point) {
                mask.set(x, y, true);
            }
        }
    }

    log::trace!(
        "Rotated {}x{} mask to {}x{} (scale {:?}, angle {})",
        source.width(),
        source.height(),
        out_width,
        out_height,
        scale,
        angle
    );

    RotatedMask {
        mask,
        offset: Vec2::new(min_x as f64 - pivot.x, min_y as f64 - pivot.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(size: usize) -> CollisionMask {
        let mut mask = CollisionMask::new(size, size);
        for i in 0..size {
            mask.set(i, 0, true);
            mask.set(i, size - 1, true);
            mask.set(0, i, true);
            mask.set(size - 1, i, true);
        }
        mask
    }

    #[test]
    fn test_single_pixel_quarter_turn() {
        let source = CollisionMask::from_rows(&[[true]]);
        let rotated = rotate_mask(&source, Vec2::zeros(), Vec2::new(1.0, 1.0), 90.0);

        // Corners (0,0) (1,0) (1,1) (0,1) land on (0,0) (0,-1) (1,-1) (1,0):
        // iMin = (0, -1), iMax = (1, 0), pivot = (0, 0)
        assert_eq!(rotated.mask, CollisionMask::from_rows(&[[true]]));
        assert_eq!(rotated.offset, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_symmetric_square_survives_quarter_turns() {
        let source = ring(6);
        let pivot = Vec2::new(3.0, 3.0);

        for angle in [90.0, 180.0, 270.0] {
            let rotated = rotate_mask(&source, pivot, Vec2::new(1.0, 1.0), angle);
            assert_eq!(rotated.mask, source, "angle {angle}");
            assert_eq!(rotated.offset, Vec2::new(-3.0, -3.0), "angle {angle}");
        }
    }

    #[test]
    fn test_left_column_turns_to_bottom_row() {
        let source = CollisionMask::from_rows(&[[true, false], [true, false]]);
        let rotated = rotate_mask(&source, Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 90.0);

        assert_eq!(
            rotated.mask,
            CollisionMask::from_rows(&[[false, false], [true, true]])
        );
    }

    #[test]
    fn test_scale_up_duplicates_pixels() {
        let source = CollisionMask::from_rows(&[[true, false]]);
        let rotated = rotate_mask(&source, Vec2::zeros(), Vec2::new(2.0, 3.0), 0.0);

        assert_eq!(rotated.mask.width(), 4);
        assert_eq!(rotated.mask.height(), 3);
        assert_eq!(rotated.mask.count(), 6);
        assert!(rotated.mask.get(1, 2));
        assert!(!rotated.mask.get(2, 0));
    }

    #[test]
    fn test_mirrored_scale_shifts_offset() {
        let source = CollisionMask::from_rows(&[[true]]);
        let rotated = rotate_mask(&source, Vec2::zeros(), Vec2::new(-1.0, 1.0), 0.0);

        assert_eq!(rotated.offset, Vec2::new(-1.0, 0.0));
        assert!(rotated.mask.get(0, 0));
    }

    #[test]
    fn test_zero_scale_produces_empty_mask() {
        let rotated = rotate_mask(&ring(4), Vec2::zeros(), Vec2::new(0.0, 1.0), 30.0);
        assert_eq!(rotated.mask.count(), 0);
    }

    #[test]
    fn test_huge_scale_produces_empty_mask() {
        let source = CollisionMask::from_rows(&[[true, true], [true, true]]);

        // Extents saturate to i64::MAX; the cell count overflows
        let area = rotate_mask(&source, Vec2::zeros(), Vec2::new(1e300, 1e300), 0.0);
        assert_eq!(area.mask.width(), 0);
        assert_eq!(area.mask.count(), 0);
        assert_eq!(area.offset, Vec2::zeros());

        // Extents saturate to i64::MIN..0; the span itself overflows
        let span = rotate_mask(&source, Vec2::zeros(), Vec2::new(-1e300, 1.0), 0.0);
        assert!(span.mask.is_empty());
    }

    #[test]
    fn test_world_hit_uses_offset() {
        let source = CollisionMask::from_rows(&[[true]]);
        let rotated = rotate_mask(&source, Vec2::zeros(), Vec2::new(1.0, 1.0), 90.0);
        let position = Vec2::new(10.0, 10.0);

        assert!(rotated.hit_world(position, Vec2::new(10.5, 9.5)));
        assert!(!rotated.hit_world(position, Vec2::new(10.5, 10.5)));
        let centres: Vec<_> = rotated.world_pixel_centres(position).collect();
        assert_eq!(centres, vec![Vec2::new(10.5, 9.5)]);
    }
}
