//! Collision queries against the registry
//!
//! Every query is a linear scan in registration order: filter by target,
//! run the narrow-phase test, report the first hit. Placement queries move
//! the instance being placed for the duration of the scan and always put it back.

use super::bbox::BBox;
use super::collider::Collider;
use super::collision_system::{pair_mut, CollisionWorld};
use super::error::CollisionError;
use super::narrow_phase::{collider_vs_collider, line_vs_collider, point_vs_collider, rect_vs_collider};
use crate::assets::{AssetProvider, ObjectId};
use crate::debug::DebugDrawSink;
use crate::foundation::math::Vec2;
use crate::instance::{Instance, InstanceId, InstanceStore};

/// Which instances a query may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionTarget {
    /// Any instance with a collider
    #[default]
    All,
    /// Instances of this object or of any object inheriting from it
    Object(ObjectId),
    /// Exactly this instance
    Instance(InstanceId),
}

impl CollisionTarget {
    /// Whether instance `id` is covered by this target
    pub fn matches<A: AssetProvider + ?Sized>(
        self,
        id: InstanceId,
        instance: &Instance,
        assets: &A,
    ) -> bool {
        match self {
            Self::All => true,
            Self::Object(object) => assets.object_is_ancestor(instance.object_index, object),
            Self::Instance(target) => target == id,
        }
    }
}

impl From<ObjectId> for CollisionTarget {
    fn from(object: ObjectId) -> Self {
        Self::Object(object)
    }
}

impl From<InstanceId> for CollisionTarget {
    fn from(id: InstanceId) -> Self {
        Self::Instance(id)
    }
}

/// First collider in registry order that matches `target` and passes `test`
fn scan<A, F>(
    colliders: &mut [Collider],
    instances: &InstanceStore,
    assets: &A,
    target: CollisionTarget,
    exclude: Option<InstanceId>,
    mut test: F,
) -> Result<Option<InstanceId>, CollisionError>
where
    A: AssetProvider + ?Sized,
    F: FnMut(&mut Collider, &Instance) -> Result<bool, CollisionError>,
{
    for collider in colliders.iter_mut() {
        let id = collider.owner();
        if Some(id) == exclude {
            continue;
        }
        let Some(owner) = instances.live(id) else {
            log::warn!("Skipping collider of dead instance {:?}", id);
            continue;
        };
        if !target.matches(id, owner, assets) {
            continue;
        }
        if test(collider, owner)? {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

impl<S: DebugDrawSink> CollisionWorld<S> {
    /// First instance whose collider touches the rectangle spanned by two corners.
    ///
    /// `precise` enables the pixel test for colliders with precise masks;
    /// `notme` excludes the calling instance.
    pub fn collision_rectangle(
        &mut self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        target: CollisionTarget,
        precise: bool,
        notme: Option<InstanceId>,
    ) -> Result<Option<InstanceId>, CollisionError> {
        let rect = BBox::from_corners(x1, y1, x2, y2);
        self.purge_stale(instances);

        let epsilon = self.config.angle_epsilon;
        let draw = self.config.debug_draw;
        if draw {
            self.debug.draw_tested_box(&rect);
        }

        let debug = &mut self.debug;
        scan(&mut self.colliders, instances, assets, target, notme, |collider, owner| {
            let hit = rect_vs_collider(collider, owner, &rect, precise, epsilon);
            if draw {
                debug.draw_actual_box(&collider.bbox(owner, epsilon), hit);
            }
            Ok(hit)
        })
    }

    /// First instance whose collider strictly contains `(x, y)`.
    ///
    /// Fails with [`CollisionError::Unsupported`] when the point lands inside
    /// the box of a collider whose mode has no point test.
    pub fn collision_point(
        &mut self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        x: f64,
        y: f64,
        target: CollisionTarget,
        precise: bool,
        notme: Option<InstanceId>,
    ) -> Result<Option<InstanceId>, CollisionError> {
        self.purge_stale(instances);

        let epsilon = self.config.angle_epsilon;
        let draw = self.config.debug_draw;
        let point = Vec2::new(x, y);
        if draw {
            self.debug.draw_tested_point(point);
        }

        let debug = &mut self.debug;
        scan(&mut self.colliders, instances, assets, target, notme, |collider, owner| {
            let bbox = collider.bbox(owner, epsilon);
            if !bbox.contains_strict(x, y) {
                return Ok(false);
            }
            let hit = point_vs_collider(collider, owner, point, precise, epsilon)?;
            if draw {
                debug.draw_actual_box(&bbox, hit);
            }
            Ok(hit)
        })
    }

    /// Point query using bounding boxes only, with no instance excluded
    pub fn instance_position(
        &mut self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        x: f64,
        y: f64,
        target: CollisionTarget,
    ) -> Result<Option<InstanceId>, CollisionError> {
        self.collision_point(instances, assets, x, y, target, false, None)
    }

    /// First instance whose bounding box the segment from `(x1, y1)` to `(x2, y2)` crosses.
    ///
    /// There is no pixel-precise line test; `precise` is accepted for call
    /// compatibility and has no effect.
    pub fn collision_line(
        &mut self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        target: CollisionTarget,
        precise: bool,
        notme: Option<InstanceId>,
    ) -> Result<Option<InstanceId>, CollisionError> {
        if precise {
            log::trace!("collision_line ignores precise masks");
        }
        self.purge_stale(instances);

        let epsilon = self.config.angle_epsilon;
        let draw = self.config.debug_draw;
        let (start, end) = (Vec2::new(x1, y1), Vec2::new(x2, y2));
        if draw {
            self.debug.draw_tested_segment(start, end);
        }

        let debug = &mut self.debug;
        scan(&mut self.colliders, instances, assets, target, notme, |collider, owner| {
            let hit = line_vs_collider(collider, owner, start, end, epsilon);
            if draw {
                debug.draw_actual_box(&collider.bbox(owner, epsilon), hit);
            }
            Ok(hit)
        })
    }

    /// First other instance the mover would collide with if it stood at `(x, y)`.
    ///
    /// The candidate position is floored to whole pixels. The mover's own
    /// position is restored before returning, hit or miss.
    pub fn instance_place(
        &mut self,
        instances: &mut InstanceStore,
        assets: &impl AssetProvider,
        mover: InstanceId,
        x: f64,
        y: f64,
        target: CollisionTarget,
    ) -> Option<InstanceId> {
        self.place_at(instances, assets, mover, x, y, target, true)
            .into_iter()
            .next()
    }

    /// Whether the mover would collide with anything matching `target` at `(x, y)`
    pub fn place_meeting(
        &mut self,
        instances: &mut InstanceStore,
        assets: &impl AssetProvider,
        mover: InstanceId,
        x: f64,
        y: f64,
        target: CollisionTarget,
    ) -> bool {
        self.instance_place(instances, assets, mover, x, y, target).is_some()
    }

    /// Every other instance the mover would collide with at `(x, y)`, in registry order
    pub fn instance_place_list(
        &mut self,
        instances: &mut InstanceStore,
        assets: &impl AssetProvider,
        mover: InstanceId,
        x: f64,
        y: f64,
        target: CollisionTarget,
    ) -> Vec<InstanceId> {
        self.place_at(instances, assets, mover, x, y, target, false)
    }

    fn place_at<A: AssetProvider>(
        &mut self,
        instances: &mut InstanceStore,
        assets: &A,
        mover: InstanceId,
        x: f64,
        y: f64,
        target: CollisionTarget,
        first_only: bool,
    ) -> Vec<InstanceId> {
        let Some(original) = instances.live(mover).map(|instance| instance.position) else {
            log::error!("Placement subject {:?} is not a live instance", mover);
            return Vec::new();
        };

        if let Some(instance) = instances.get_mut(mover) {
            instance.position = Vec2::new(x.floor(), y.floor());
        }
        let hits = self.place_scan(instances, assets, mover, target, first_only);
        if let Some(instance) = instances.get_mut(mover) {
            instance.position = original;
        }
        hits
    }

    fn place_scan<A: AssetProvider>(
        &mut self,
        instances: &InstanceStore,
        assets: &A,
        mover: InstanceId,
        target: CollisionTarget,
        first_only: bool,
    ) -> Vec<InstanceId> {
        self.purge_stale(instances);

        let (Some(mover_index), Some(mover_owner)) = (self.index_of(mover), instances.live(mover)) else {
            log::error!("Placement subject {:?} has no registered collider", mover);
            return Vec::new();
        };

        let epsilon = self.config.angle_epsilon;
        let draw = self.config.debug_draw;
        if draw {
            let tested = self.colliders[mover_index].bbox(mover_owner, epsilon);
            self.debug.draw_tested_box(&tested);
        }

        let mut hits = Vec::new();
        for index in 0..self.colliders.len() {
            if index == mover_index {
                continue;
            }
            let other_id = self.colliders[index].owner();
            let Some(other) = instances.live(other_id) else {
                log::warn!("Skipping collider of dead instance {:?}", other_id);
                continue;
            };
            if !target.matches(other_id, other, assets) {
                continue;
            }

            let (mover_collider, other_collider) = pair_mut(&mut self.colliders, mover_index, index);
            let hit = collider_vs_collider(mover_collider, mover_owner, other_collider, other, epsilon);
            if draw {
                self.debug.draw_actual_box(&other_collider.bbox(other, epsilon), hit);
            }

            if hit {
                hits.push(other_id);
                if first_only {
                    break;
                }
            }
        }
        hits
    }

    /// Gap between the bounding boxes of two instances (zero when they overlap)
    pub fn distance_between(
        &self,
        instances: &InstanceStore,
        a: InstanceId,
        b: InstanceId,
    ) -> Option<f64> {
        let a_box = self.bbox(instances, a)?;
        let b_box = self.bbox(instances, b)?;
        Some(a_box.gap_distance(&b_box))
    }

    /// Smallest gap between the box of `from` and any other instance matching `target`
    pub fn distance_to_object(
        &self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        from: InstanceId,
        target: CollisionTarget,
    ) -> Option<f64> {
        let from_box = self.bbox(instances, from)?;
        let epsilon = self.config.angle_epsilon;

        self.colliders
            .iter()
            .filter(|collider| collider.owner() != from)
            .filter_map(|collider| {
                let owner = instances.live(collider.owner())?;
                target
                    .matches(collider.owner(), owner, assets)
                    .then(|| collider.bbox(owner, epsilon))
            })
            .map(|bbox| from_box.gap_distance(&bbox))
            .reduce(f64::min)
    }

    /// Gap between the box of `from` and the point `(x, y)`
    pub fn distance_to_point(
        &self,
        instances: &InstanceStore,
        from: InstanceId,
        x: f64,
        y: f64,
    ) -> Option<f64> {
        let from_box = self.bbox(instances, from)?;
        Some(from_box.gap_distance(&BBox::point(x, y)))
    }
}
