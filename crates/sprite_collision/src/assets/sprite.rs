//! Sprite geometry and collision masks as delivered by the asset loader

use crate::foundation::math::Vec2;
use crate::physics::bbox::BBoxMargins;
use crate::physics::collider::SeparationMode;

/// One sprite asset, reduced to what collision needs
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAsset {
    /// Asset name; used to detect sprite swaps on re-registration
    pub name: String,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Origin (rotation and scale pivot) in local pixel space
    pub origin: Vec2,

    /// Default collision margins
    pub margins: BBoxMargins,

    /// Which collision algorithm applies to instances using this sprite
    pub separation: SeparationMode,

    /// Packed collision mask per frame, row-padded and MSB-first
    pub masks: Vec<Vec<u8>>,
}

impl SpriteAsset {
    /// Create a sprite whose margins cover the whole frame
    pub fn new(name: impl Into<String>, width: u32, height: u32, separation: SeparationMode) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            origin: Vec2::zeros(),
            margins: BBoxMargins::full(width, height),
            separation,
            masks: Vec::new(),
        }
    }

    /// Set the origin
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    /// Set the collision margins
    pub fn with_margins(mut self, margins: BBoxMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Append one packed frame mask
    pub fn with_mask(mut self, packed: Vec<u8>) -> Self {
        self.masks.push(packed);
        self
    }

    /// Append a frame mask with every pixel set
    pub fn with_solid_mask(self) -> Self {
        let stride = (self.width as usize).div_ceil(8);
        let mut row = vec![0xFF_u8; stride];
        let tail = self.width % 8;
        if tail != 0 {
            if let Some(last) = row.last_mut() {
                *last = 0xFF << (8 - tail);
            }
        }
        let packed = row.repeat(self.height as usize);
        self.with_mask(packed)
    }

    /// Index of the mask used for animation frame `image_index`.
    ///
    /// The frame is the floor of the index, clamped into the available masks.
    /// Returns `None` when the sprite has no masks.
    pub fn mask_frame(&self, image_index: f64) -> Option<usize> {
        let last = self.masks.len().checked_sub(1)?;
        let frame = if image_index.is_finite() && image_index > 0.0 {
            image_index.floor() as usize
        } else {
            0
        };
        Some(frame.min(last))
    }
}
