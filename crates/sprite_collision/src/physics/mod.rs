//! Sprite collision detection
//!
//! Bounding boxes, rotated rectangles and per-pixel masks for 2D sprites,
//! a registry of per-instance colliders, and the spatial queries game logic
//! runs against it.

pub mod bbox;
pub mod collider;
pub mod collision_system;
pub mod error;
pub mod mask;
pub mod narrow_phase;
pub mod query;
pub mod rotation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bbox::{BBox, BBoxMargins, BoxPlacement};
pub use collider::{Collider, SeparationMode};
pub use collision_system::CollisionWorld;
pub use error::{CollisionError, NarrowTest};
pub use mask::{CollisionMask, MaskError};
pub use query::CollisionTarget;
pub use rotation::{RotatedMask, SamplePolicy};
