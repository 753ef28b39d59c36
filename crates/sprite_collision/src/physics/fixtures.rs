//! Shared scene setup for registry and query tests

use super::collider::SeparationMode;
use super::collision_system::CollisionWorld;
use super::error::CollisionError;
use crate::assets::{AssetLibrary, ObjectId, SpriteAsset, SpriteId};
use crate::foundation::math::Vec2;
use crate::instance::{Instance, InstanceId, InstanceStore};

/// Instances, assets and a world wired together
pub(crate) struct Scene {
    pub instances: InstanceStore,
    pub assets: AssetLibrary,
    pub world: CollisionWorld,
    /// Plain object with no parent
    pub object: ObjectId,
    /// 10x10 solid axis-aligned sprite with its origin at the top-left
    pub square: SpriteId,
}

impl Scene {
    pub fn new() -> Self {
        crate::foundation::logging::init_for_tests();

        let mut assets = AssetLibrary::new();
        let object = assets.add_object("obj_block", None);
        let square = assets.add_sprite(
            SpriteAsset::new("spr_square", 10, 10, SeparationMode::AxisAlignedRect)
                .with_solid_mask(),
        );

        Self {
            instances: InstanceStore::new(),
            assets,
            world: CollisionWorld::new(),
            object,
            square,
        }
    }

    pub fn register(&mut self, id: InstanceId) -> Result<(), CollisionError> {
        self.world.register_collider(&self.instances, &self.assets, id, None)
    }

    /// Create and register a square at `(x, y)`
    pub fn spawn(&mut self, x: f64, y: f64) -> InstanceId {
        let instance = Instance::new(self.object, Vec2::new(x, y)).with_sprite(self.square);
        self.spawn_instance(instance)
    }

    /// Create and register an arbitrary instance
    pub fn spawn_instance(&mut self, instance: Instance) -> InstanceId {
        let id = self.instances.create(instance);
        self.register(id).expect("fixture instance registers");
        id
    }
}
