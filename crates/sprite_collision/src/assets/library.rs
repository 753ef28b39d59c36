//! In-memory asset library

use super::{AssetProvider, ObjectId, SpriteAsset, SpriteId};
use std::collections::HashMap;

/// Object asset entry: a name and an optional parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAsset {
    /// Object name
    pub name: String,
    /// Parent object for inheritance-aware matching
    pub parent: Option<ObjectId>,
}

/// Sprite and object tables handed to the collision engine
#[derive(Debug, Default)]
pub struct AssetLibrary {
    sprites: HashMap<SpriteId, SpriteAsset>,
    objects: HashMap<ObjectId, ObjectAsset>,
    next_sprite: u32,
    next_object: u32,
}

impl AssetLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite and return its id
    pub fn add_sprite(&mut self, sprite: SpriteAsset) -> SpriteId {
        let id = SpriteId(self.next_sprite);
        self.next_sprite += 1;
        self.sprites.insert(id, sprite);
        id
    }

    /// Replace a sprite in place (e.g. after a reload)
    pub fn replace_sprite(&mut self, id: SpriteId, sprite: SpriteAsset) -> Option<SpriteAsset> {
        self.sprites.insert(id, sprite)
    }

    /// Add an object asset and return its id
    pub fn add_object(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.objects.insert(id, ObjectAsset { name: name.into(), parent });
        id
    }

    /// Look up an object asset
    pub fn object(&self, id: ObjectId) -> Option<&ObjectAsset> {
        self.objects.get(&id)
    }
}

impl AssetProvider for AssetLibrary {
    fn sprite(&self, id: SpriteId) -> Option<&SpriteAsset> {
        self.sprites.get(&id)
    }

    fn object_parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(&id).and_then(|object| object.parent)
    }
}
