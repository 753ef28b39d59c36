//! Collision engine errors

use super::collider::SeparationMode;
use super::mask::MaskError;
use crate::assets::SpriteId;
use crate::instance::InstanceId;
use std::fmt;
use thiserror::Error;

/// Narrow-phase test kinds, for reporting unsupported combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowTest {
    /// Point containment
    Point,
    /// Rectangle overlap
    Rectangle,
    /// Segment intersection
    Line,
    /// Collider against collider
    Pair,
}

impl fmt::Display for NarrowTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Rectangle => "rectangle",
            Self::Line => "line",
            Self::Pair => "collider pair",
        };
        f.write_str(name)
    }
}

/// Errors raised by registration and queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// The instance handle does not resolve to a live instance
    #[error("instance {0:?} does not exist or is destroyed")]
    MissingInstance(InstanceId),

    /// The instance has neither a sprite nor a mask override
    #[error("instance {0:?} has no sprite or mask assigned")]
    NoSprite(InstanceId),

    /// The sprite id is not known to the asset provider
    #[error("sprite {0:?} not found")]
    MissingSprite(SpriteId),

    /// The sprite has no per-frame collision masks
    #[error("sprite '{0}' has no collision masks")]
    NoMasks(String),

    /// The packed mask could not be decoded
    #[error("invalid collision mask: {0}")]
    Mask(#[from] MaskError),

    /// A placement query needs the moving instance's collider but none is registered
    #[error("instance {0:?} has no registered collider")]
    MissingCollider(InstanceId),

    /// This separation mode has no implementation for the requested test
    #[error("{test} test is not implemented for {mode:?} colliders")]
    Unsupported {
        /// Requested test
        test: NarrowTest,
        /// Collider separation mode
        mode: SeparationMode,
    },
}
