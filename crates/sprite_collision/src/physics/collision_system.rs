//! Collider registry and lifecycle
//!
//! A [`CollisionWorld`] holds one [`Collider`] per registered instance in
//! registration order. Queries scan that order linearly and report the first
//! match, so the order is observable and must be preserved.
//!
//! The world does not own instances or assets. Every call receives the
//! [`InstanceStore`] and an [`AssetProvider`] it should read from, which keeps
//! the world free of global state and lets several worlds coexist.
//!
//! Debug shapes go to a [`DebugDrawSink`]. The default is a
//! [`DebugDrawSystem`]; hosts with their own renderer plug theirs in through
//! [`CollisionWorld::with_sink`].

use super::bbox::{BBox, BBoxMargins};
use super::collider::Collider;
use super::error::CollisionError;
use super::mask::CollisionMask;
use crate::assets::AssetProvider;
use crate::config::CollisionConfig;
use crate::debug::{CollisionDebugVisualizer, DebugDrawSink, DebugDrawSystem};
use crate::instance::{InstanceId, InstanceStore};

/// Registry of colliders plus the settings queries run with
pub struct CollisionWorld<S = DebugDrawSystem> {
    /// Colliders in registration order
    pub(crate) colliders: Vec<Collider>,

    /// Runtime settings
    pub(crate) config: CollisionConfig,

    /// Diagnostic shapes, filled only while `config.debug_draw` is set
    pub(crate) debug: CollisionDebugVisualizer<S>,
}

impl CollisionWorld {
    /// Create an empty world with default settings
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty world with the given settings
    pub fn with_config(config: CollisionConfig) -> Self {
        Self::with_sink(config, DebugDrawSystem::new())
    }
}

impl<S: DebugDrawSink> CollisionWorld<S> {
    /// Create an empty world whose debug shapes go to `sink`
    pub fn with_sink(config: CollisionConfig, sink: S) -> Self {
        let debug = CollisionDebugVisualizer::with_sink(sink, config.debug_draw_duration);
        Self {
            colliders: Vec::new(),
            config,
            debug,
        }
    }

    /// Current settings
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Turn debug drawing of tested and actual boxes on or off
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.config.debug_draw = enabled;
        if !enabled {
            self.debug.clear();
        }
    }

    /// Debug shapes queued by recent queries
    pub fn debug_visualizer(&self) -> &CollisionDebugVisualizer<S> {
        &self.debug
    }

    /// Mutable access to the debug shapes, e.g. to expire them once per frame
    pub fn debug_visualizer_mut(&mut self) -> &mut CollisionDebugVisualizer<S> {
        &mut self.debug
    }

    /// Create or refresh the collider of instance `id`.
    ///
    /// The collision sprite is the instance's mask override, falling back to
    /// its drawn sprite. `margins` replaces the sprite's default margins when
    /// given. Re-registering keeps the collider's place in the registry and
    /// only rebuilds the rotated mask when the sprite or frame changed.
    pub fn register_collider(
        &mut self,
        instances: &InstanceStore,
        assets: &impl AssetProvider,
        id: InstanceId,
        margins: Option<BBoxMargins>,
    ) -> Result<(), CollisionError> {
        let Some(instance) = instances.live(id) else {
            log::error!("Cannot register collider: instance {:?} is not alive", id);
            return Err(CollisionError::MissingInstance(id));
        };

        let Some(sprite_id) = instance.collision_sprite() else {
            log::error!("Cannot register collider: instance {:?} has no sprite", id);
            return Err(CollisionError::NoSprite(id));
        };

        let Some(sprite) = assets.sprite(sprite_id) else {
            log::error!("Cannot register collider for {:?}: sprite {:?} not found", id, sprite_id);
            return Err(CollisionError::MissingSprite(sprite_id));
        };

        let Some((frame, packed)) = sprite
            .mask_frame(instance.image_index)
            .and_then(|frame| sprite.masks.get(frame).map(|packed| (frame, packed)))
        else {
            log::error!("Cannot register collider for {:?}: sprite '{}' has no masks", id, sprite.name);
            return Err(CollisionError::NoMasks(sprite.name.clone()));
        };

        let mask = CollisionMask::decode(packed, sprite.width as usize, sprite.height as usize)
            .map_err(|e| {
                log::error!("Cannot register collider for {:?}: sprite '{}': {}", id, sprite.name, e);
                CollisionError::from(e)
            })?;
        let margins = margins.unwrap_or(sprite.margins);

        if let Some(index) = self.index_of(id) {
            let collider = &mut self.colliders[index];
            let source_changed = !collider.same_source(&sprite.name, frame);

            collider.mask = mask;
            collider.pivot = sprite.origin;
            collider.margins = margins;
            collider.mode = sprite.separation;
            collider.set_source(sprite_id, sprite.name.clone(), frame);

            if source_changed {
                log::debug!("Collider for {:?} switched to '{}' frame {}", id, sprite.name, frame);
                collider.rebuild_rotation(instance);
            }
            return Ok(());
        }

        let mut collider = Collider::new(
            id,
            sprite_id,
            sprite.name.clone(),
            frame,
            mask,
            sprite.origin,
            margins,
            sprite.separation,
        );
        collider.rebuild_rotation(instance);
        self.colliders.push(collider);

        log::debug!(
            "Registered collider for {:?} ('{}' frame {}, {:?})",
            id,
            sprite.name,
            frame,
            sprite.separation
        );
        Ok(())
    }

    /// Remove the collider of `id`, along with any collider whose owner is gone
    pub fn unregister_collider(&mut self, instances: &InstanceStore, id: InstanceId) {
        let before = self.colliders.len();
        self.colliders
            .retain(|collider| collider.owner() != id && instances.is_live(collider.owner()));

        log::debug!(
            "Unregistered collider for {:?} ({} entries removed)",
            id,
            before - self.colliders.len()
        );
    }

    /// Drop every collider whose owner is not a live persistent instance
    pub fn room_change(&mut self, instances: &InstanceStore) {
        let before = self.colliders.len();
        self.colliders.retain(|collider| {
            instances
                .live(collider.owner())
                .is_some_and(|instance| instance.persistent)
        });

        log::debug!(
            "Room change kept {} of {} colliders",
            self.colliders.len(),
            before
        );
    }

    /// Rebuild the rotated mask of `id` from its owner's current scale and angle
    pub fn update_rotation_mask(
        &mut self,
        instances: &InstanceStore,
        id: InstanceId,
    ) -> Result<(), CollisionError> {
        let instance = instances
            .live(id)
            .ok_or(CollisionError::MissingInstance(id))?;
        let collider = self
            .collider_mut(id)
            .ok_or(CollisionError::MissingCollider(id))?;
        collider.rebuild_rotation(instance);
        Ok(())
    }

    /// Drop the rotated mask of `id`; the next pixel test rebuilds it
    pub fn invalidate_rotation_mask(&mut self, id: InstanceId) {
        if let Some(collider) = self.collider_mut(id) {
            collider.invalidate_rotation();
        }
    }

    /// Remove colliders whose owner no longer resolves to a live instance.
    ///
    /// Returns how many entries were removed.
    pub fn purge_stale(&mut self, instances: &InstanceStore) -> usize {
        let before = self.colliders.len();
        self.colliders.retain(|collider| {
            let live = instances.is_live(collider.owner());
            if !live {
                log::warn!("Purging collider of dead instance {:?}", collider.owner());
            }
            live
        });
        before - self.colliders.len()
    }

    /// World-space bounding box of the collider of `id`
    pub fn bbox(&self, instances: &InstanceStore, id: InstanceId) -> Option<BBox> {
        let instance = instances.live(id)?;
        let collider = self.collider(id)?;
        Some(collider.bbox(instance, self.config.angle_epsilon))
    }

    /// Check if an instance has a registered collider
    pub fn has_collider(&self, id: InstanceId) -> bool {
        self.index_of(id).is_some()
    }

    /// Collider of `id`, if registered
    pub fn collider(&self, id: InstanceId) -> Option<&Collider> {
        self.colliders.iter().find(|collider| collider.owner() == id)
    }

    /// Colliders in registration order
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    /// Get number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Clear all colliders
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.debug.clear();
    }

    pub(crate) fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.colliders.iter().position(|collider| collider.owner() == id)
    }

    fn collider_mut(&mut self, id: InstanceId) -> Option<&mut Collider> {
        self.colliders.iter_mut().find(|collider| collider.owner() == id)
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrow two distinct registry entries mutably at once
pub(crate) fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (low, high) = items.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}
