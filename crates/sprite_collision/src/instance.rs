//! Simulated object instances
//!
//! The room/instance lifecycle manager owns creation and destruction; this
//! module is the data it exposes to the collision engine. Instances are kept
//! in a generational slot map, so a handle to a removed instance simply stops
//! resolving instead of aliasing a newer one.

use crate::assets::{ObjectId, SpriteId};
use crate::foundation::math::Vec2;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle naming one simulated object instance
    pub struct InstanceId;
}

/// Live state of one simulated object as seen by collision queries
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Object asset this instance was created from
    pub object_index: ObjectId,

    /// World position of the sprite origin
    pub position: Vec2,

    /// Per-axis scale (`image_xscale`, `image_yscale`)
    pub scale: Vec2,

    /// Rotation in degrees, counter-clockwise on screen
    pub angle: f64,

    /// Current animation frame; fractional values select the frame below
    pub image_index: f64,

    /// Sprite drawn for this instance
    pub sprite_index: Option<SpriteId>,

    /// Sprite used for collision instead of `sprite_index`, when set
    pub mask_index: Option<SpriteId>,

    /// Survives room transitions
    pub persistent: bool,

    destroyed: bool,
}

impl Instance {
    /// Create an instance of `object_index` at `position` with an identity transform
    pub fn new(object_index: ObjectId, position: Vec2) -> Self {
        Self {
            object_index,
            position,
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
            image_index: 0.0,
            sprite_index: None,
            mask_index: None,
            persistent: false,
            destroyed: false,
        }
    }

    /// Set the drawn sprite
    pub fn with_sprite(mut self, sprite: SpriteId) -> Self {
        self.sprite_index = Some(sprite);
        self
    }

    /// Set a collision mask override
    pub fn with_mask(mut self, sprite: SpriteId) -> Self {
        self.mask_index = Some(sprite);
        self
    }

    /// Set per-axis scale
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    /// Set rotation in degrees
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Mark as persistent across rooms
    pub fn as_persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Sprite whose masks drive collision: the override if set, else the drawn sprite
    pub fn collision_sprite(&self) -> Option<SpriteId> {
        self.mask_index.or(self.sprite_index)
    }

    /// Whether the instance has been destroyed but not yet removed
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Owner of all live instances
#[derive(Debug, Default)]
pub struct InstanceStore {
    instances: SlotMap<InstanceId, Instance>,
}

impl InstanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance and return its handle
    pub fn create(&mut self, instance: Instance) -> InstanceId {
        self.instances.insert(instance)
    }

    /// Flag an instance as destroyed; it stays resolvable until [`remove`](Self::remove)
    pub fn destroy(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(id) {
            instance.destroyed = true;
        }
    }

    /// Drop an instance entirely
    pub fn remove(&mut self, id: InstanceId) -> Option<Instance> {
        self.instances.remove(id)
    }

    /// Look up an instance, destroyed or not
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(id)
    }

    /// Look up an instance that exists and is not destroyed
    pub fn live(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id).filter(|instance| !instance.destroyed)
    }

    /// Whether `id` names a live instance
    pub fn is_live(&self, id: InstanceId) -> bool {
        self.live(id).is_some()
    }

    /// Iterate over every stored instance
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &Instance)> {
        self.instances.iter()
    }

    /// Number of stored instances, including destroyed ones
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
