//! # Sprite Collision
//!
//! Collision detection and spatial queries for a 2D sprite engine.
//!
//! ## Features
//!
//! - **Three separation modes**: axis-aligned boxes, rotated rectangles and
//!   per-pixel masks, chosen per sprite
//! - **Rotated masks**: pixel masks resampled for any scale and angle, cached
//!   per instance and rebuilt on request
//! - **Spatial queries**: rectangle, point, line and placement checks with
//!   object inheritance aware filtering
//! - **Debug drawing**: optional outlines of each tested shape and candidate
//!   box, sent to the built-in queue or a host-supplied sink
//!
//! ## Quick Start
//!
//! ```rust
//! use sprite_collision::prelude::*;
//!
//! let mut assets = AssetLibrary::new();
//! let wall = assets.add_object("obj_wall", None);
//! let block = assets.add_sprite(
//!     SpriteAsset::new("spr_block", 16, 16, SeparationMode::AxisAlignedRect).with_solid_mask(),
//! );
//!
//! let mut instances = InstanceStore::new();
//! let a = instances.create(Instance::new(wall, Vec2::new(0.0, 0.0)).with_sprite(block));
//! let b = instances.create(Instance::new(wall, Vec2::new(40.0, 0.0)).with_sprite(block));
//!
//! let mut world = CollisionWorld::new();
//! world.register_collider(&instances, &assets, a, None)?;
//! world.register_collider(&instances, &assets, b, None)?;
//!
//! // Would `b` hit `a` one step to the left of it?
//! assert!(!world.place_meeting(&mut instances, &assets, b, 20.0, 0.0, CollisionTarget::Object(wall)));
//! assert!(world.place_meeting(&mut instances, &assets, b, 16.0, 0.0, CollisionTarget::Object(wall)));
//! # Ok::<(), CollisionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod instance;
pub mod assets;
pub mod physics;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::Vec2,
        config::{CollisionConfig, Config},
        instance::{Instance, InstanceId, InstanceStore},
        assets::{AssetLibrary, AssetProvider, ObjectId, SpriteAsset, SpriteId},
        physics::{
            BBox, BBoxMargins, CollisionError, CollisionTarget, CollisionWorld, SeparationMode,
        },
        debug::{CollisionDebugVisualizer, DebugDrawSink, DebugShape},
    };
}
