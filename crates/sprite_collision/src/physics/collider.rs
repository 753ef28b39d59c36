//! Per-instance collision state

use super::bbox::{BBox, BBoxMargins, BoxPlacement};
use super::mask::CollisionMask;
use super::rotation::{rotate_mask, RotatedMask};
use crate::assets::SpriteId;
use crate::foundation::math::Vec2;
use crate::instance::{Instance, InstanceId};
use serde::{Deserialize, Serialize};

/// Which collision algorithm class applies to a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeparationMode {
    /// Axis-aligned bounding box
    #[default]
    AxisAlignedRect,
    /// Bounding box rotated with the instance
    RotatedRect,
    /// Per-pixel mask
    Precise,
}

/// Collision record for one tracked instance
///
/// Scale and angle are never stored here; every test reads them from the
/// owning [`Instance`] so the collider cannot drift from its owner.
#[derive(Debug, Clone)]
pub struct Collider {
    owner: InstanceId,
    sprite: SpriteId,
    sprite_name: String,
    frame: usize,
    pub(crate) mask: CollisionMask,
    pub(crate) pivot: Vec2,
    pub(crate) margins: BBoxMargins,
    pub(crate) mode: SeparationMode,
    rotated: Option<RotatedMask>,
    rotation_builds: u64,
}

impl Collider {
    pub(crate) fn new(
        owner: InstanceId,
        sprite: SpriteId,
        sprite_name: String,
        frame: usize,
        mask: CollisionMask,
        pivot: Vec2,
        margins: BBoxMargins,
        mode: SeparationMode,
    ) -> Self {
        Self {
            owner,
            sprite,
            sprite_name,
            frame,
            mask,
            pivot,
            margins,
            mode,
            rotated: None,
            rotation_builds: 0,
        }
    }

    /// Instance this collider belongs to
    pub fn owner(&self) -> InstanceId {
        self.owner
    }

    /// Sprite the mask was taken from
    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    /// Name of the sprite the mask was taken from
    pub fn sprite_name(&self) -> &str {
        &self.sprite_name
    }

    /// Mask frame index in use
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Unrotated local mask
    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Rotation and scale pivot in local pixel space
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Collision margins
    pub fn margins(&self) -> BBoxMargins {
        self.margins
    }

    /// Separation mode
    pub fn mode(&self) -> SeparationMode {
        self.mode
    }

    /// Cached world-oriented mask, if one is built
    pub fn rotated_mask(&self) -> Option<&RotatedMask> {
        self.rotated.as_ref()
    }

    /// How many times the rotated mask has been rebuilt
    pub fn rotation_builds(&self) -> u64 {
        self.rotation_builds
    }

    /// Whether the collider was built from `sprite_name` at `frame`
    pub(crate) fn same_source(&self, sprite_name: &str, frame: usize) -> bool {
        self.sprite_name == sprite_name && self.frame == frame
    }

    pub(crate) fn set_source(&mut self, sprite: SpriteId, sprite_name: String, frame: usize) {
        self.sprite = sprite;
        self.sprite_name = sprite_name;
        self.frame = frame;
    }

    /// Placement of the collision rectangle for the owner's current transform
    pub fn placement(&self, owner: &Instance) -> BoxPlacement {
        BoxPlacement {
            position: owner.position,
            scale: owner.scale,
            angle: owner.angle,
            pivot: self.pivot,
            margins: self.margins,
        }
    }

    /// World-space bounding box for the owner's current transform
    pub fn bbox(&self, owner: &Instance, angle_epsilon: f64) -> BBox {
        BBox::compute(&self.placement(owner), angle_epsilon)
    }

    /// Resample the local mask for the owner's current scale and angle
    pub fn rebuild_rotation(&mut self, owner: &Instance) {
        self.rotated = Some(rotate_mask(&self.mask, self.pivot, owner.scale, owner.angle));
        self.rotation_builds += 1;
    }

    /// Drop the cached rotated mask
    pub fn invalidate_rotation(&mut self) {
        self.rotated = None;
    }

    /// Return the rotated mask, building it first if it was invalidated
    pub fn require_rotation(&mut self, owner: &Instance) -> &RotatedMask {
        if self.rotated.is_none() {
            self.rebuild_rotation(owner);
        }
        self.rotated.get_or_insert_with(RotatedMask::default)
    }
}
