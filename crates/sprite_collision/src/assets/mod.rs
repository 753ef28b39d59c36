//! Asset data consumed by the collision engine
//!
//! Sprite loading itself happens elsewhere; the collision engine only needs
//! sprite geometry, separation mode and the packed per-frame masks, plus the
//! object inheritance chain for asset-id matching.

pub mod sprite;
pub mod library;

pub use sprite::SpriteAsset;
pub use library::{AssetLibrary, ObjectAsset};

/// Identifier of a sprite asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

/// Identifier of an object asset (the "type" an instance is created from)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Read access to sprites and object inheritance
pub trait AssetProvider {
    /// Look up a sprite
    fn sprite(&self, id: SpriteId) -> Option<&SpriteAsset>;

    /// Parent of an object asset, if it has one
    fn object_parent(&self, id: ObjectId) -> Option<ObjectId>;

    /// Whether `object` is `ancestor` or inherits from it.
    ///
    /// Walks the parent chain; a cycle in the chain is cut after as many steps
    /// as a chain could possibly have without repeating.
    fn object_is_ancestor(&self, object: ObjectId, ancestor: ObjectId) -> bool {
        let mut current = Some(object);
        let mut steps = 0usize;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > u16::MAX as usize {
                log::warn!("Object parent chain from {:?} does not terminate", object);
                return false;
            }
            current = self.object_parent(id);
        }
        false
    }
}
