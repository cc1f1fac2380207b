//! Arcade body

use skirmish_core::{Rect, Vec2};

/// An axis-aligned body. `position` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    velocity: Vec2,
    /// Keep the body inside the world bounds when integrating
    pub collide_world_bounds: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
            velocity: Vec2::ZERO,
            collide_world_bounds: true,
        }
    }

    /// Place the body so that its center sits at `center`
    pub fn centered_at(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn with_world_bounds(mut self, collide: bool) -> Self {
        self.collide_world_bounds = collide;
        self
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = Vec2::new(x, y);
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}
