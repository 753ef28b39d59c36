//! Debug module for visualization and debugging tools

pub mod draw;
pub mod collision_debug;

pub use draw::{Color, DebugShape, DebugDrawSink, DebugDrawSystem};
pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer};
