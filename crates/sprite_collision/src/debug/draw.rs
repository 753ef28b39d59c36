//! Debug drawing primitives and system
//!
//! Collision code never renders anything; it only queues shapes through a
//! [`DebugDrawSink`]. [`DebugDrawSystem`] is the built-in sink a host
//! renderer can read back once per frame.

use crate::foundation::math::Vec2;

/// RGBA colour, components in `0.0..=1.0`
pub type Color = nalgebra::Vector4<f32>;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Closed polygon outline
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        duration: f32,
    },

    /// Line segment from start to end
    Line {
        start: Vec2,
        end: Vec2,
        color: Color,
        duration: f32,
    },

    /// Point at position
    Point {
        position: Vec2,
        color: Color,
        size: f32,
        duration: f32,
    },
}

impl DebugShape {
    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = match self {
            Self::Polygon { duration, .. }
            | Self::Line { duration, .. }
            | Self::Point { duration, .. } => duration,
        };
        *duration -= delta_time;
        *duration <= 0.0
    }
}

/// Anything that accepts ad hoc debug shapes
pub trait DebugDrawSink {
    /// Queue a closed polygon outline
    fn submit_polygon(&mut self, points: &[Vec2], color: Color, duration: f32);

    /// Queue a line segment
    fn submit_line(&mut self, start: Vec2, end: Vec2, color: Color, duration: f32);

    /// Queue a point marker
    fn submit_point(&mut self, position: Vec2, color: Color, size: f32, duration: f32);

    /// Drop everything queued so far
    fn clear(&mut self) {}
}

/// Debug drawing system holding shapes until they expire
pub struct DebugDrawSystem {
    /// Shapes that expire after their duration
    shapes: Vec<DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            enabled: true,
        }
    }

    fn push(&mut self, shape: DebugShape) {
        if self.enabled {
            self.shapes.push(shape);
        }
    }

    /// Update shape lifetimes and remove expired shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.shapes.iter().collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

impl DebugDrawSink for DebugDrawSystem {
    fn submit_polygon(&mut self, points: &[Vec2], color: Color, duration: f32) {
        self.push(DebugShape::Polygon {
            points: points.to_vec(),
            color,
            duration,
        });
    }

    fn submit_line(&mut self, start: Vec2, end: Vec2, color: Color, duration: f32) {
        self.push(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    fn submit_point(&mut self, position: Vec2, color: Color, size: f32, duration: f32) {
        self.push(DebugShape::Point {
            position,
            color,
            size,
            duration,
        });
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
