//! Collision-specific debug visualization
//!
//! Queues the shape a query tested and the bounding boxes it was tested
//! against, coloured by outcome. Shapes go to any [`DebugDrawSink`]; without
//! one supplied by the host they collect in a [`DebugDrawSystem`].

use crate::debug::draw::{Color, DebugDrawSink, DebugDrawSystem, DebugShape};
use crate::foundation::math::Vec2;
use crate::physics::bbox::BBox;

/// Marker size for tested points, in pixels
const POINT_SIZE: f32 = 3.0;

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Query shape or moving collider box
    pub tested: Color,

    /// Candidate box that did not collide
    pub actual_miss: Color,

    /// Candidate box that collided
    pub actual_hit: Color,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            tested: Color::new(0.5, 0.8, 1.0, 0.6),     // Light blue
            actual_miss: Color::new(0.0, 1.0, 0.0, 0.4), // Green, semi-transparent
            actual_hit: Color::new(1.0, 0.0, 0.0, 0.6),  // Red
        }
    }
}

/// Collision-specific debug visualizer writing into a [`DebugDrawSink`]
pub struct CollisionDebugVisualizer<S = DebugDrawSystem> {
    sink: S,
    colors: CollisionDebugColors,
    duration: f32,
}

impl CollisionDebugVisualizer {
    /// Create a visualizer with its own [`DebugDrawSystem`]; shapes live for `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self::with_sink(DebugDrawSystem::new(), duration)
    }

    /// Update debug system (expire shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.sink.update(delta_time);
    }

    /// Get all debug shapes for rendering
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        self.sink.get_shapes()
    }
}

impl<S: DebugDrawSink> CollisionDebugVisualizer<S> {
    /// Create a visualizer that forwards to a host-supplied sink
    pub fn with_sink(sink: S, duration: f32) -> Self {
        Self {
            sink,
            colors: CollisionDebugColors::default(),
            duration,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Queue the box a query tested with
    pub fn draw_tested_box(&mut self, bbox: &BBox) {
        self.sink.submit_polygon(&bbox.corners(), self.colors.tested, self.duration);
    }

    /// Queue the segment a line query tested with
    pub fn draw_tested_segment(&mut self, start: Vec2, end: Vec2) {
        self.sink.submit_line(start, end, self.colors.tested, self.duration);
    }

    /// Queue the point a point query tested with
    pub fn draw_tested_point(&mut self, position: Vec2) {
        self.sink.submit_point(position, self.colors.tested, POINT_SIZE, self.duration);
    }

    /// Queue a candidate's actual box
    pub fn draw_actual_box(&mut self, bbox: &BBox, hit: bool) {
        let color = if hit {
            self.colors.actual_hit
        } else {
            self.colors.actual_miss
        };
        self.sink.submit_polygon(&bbox.corners(), color, self.duration);
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.sink.clear();
    }

    /// The sink shapes are written to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new(0.0)
    }
}
