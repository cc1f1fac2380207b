//! Physics world owning every body

use crate::body::Body;
use skirmish_core::{Rect, Result, SkirmishError};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle a `Physics` component holds to reach its body
    pub struct BodyHandle;
}

/// Owns arcade bodies and integrates their velocities
pub struct PhysicsWorld {
    bodies: SlotMap<BodyHandle, Body>,
    /// World bounds that bodies with `collide_world_bounds` stay inside
    bounds: Rect,
}

impl PhysicsWorld {
    /// Create a world with the given bounds
    pub fn new(bounds: Rect) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            bounds,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.insert(body)
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.remove(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies
            .get(handle)
            .ok_or_else(|| SkirmishError::Physics(format!("unknown body handle {:?}", handle)))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies
            .get_mut(handle)
            .ok_or_else(|| SkirmishError::Physics(format!("unknown body handle {:?}", handle)))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Step the simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        let bounds = self.bounds;
        for (handle, body) in self.bodies.iter_mut() {
            let velocity = body.velocity();
            if velocity.is_zero() {
                continue;
            }

            body.position = body.position + velocity * dt;

            if body.collide_world_bounds {
                let (x, blocked_x) = clamp_axis(body.position.x, bounds.x, bounds.right() - body.width);
                let (y, blocked_y) = clamp_axis(body.position.y, bounds.y, bounds.bottom() - body.height);
                body.position.x = x;
                body.position.y = y;

                if blocked_x || blocked_y {
                    log::trace!("body {:?} blocked by world bounds", handle);
                    body.set_velocity(
                        if blocked_x { 0.0 } else { velocity.x },
                        if blocked_y { 0.0 } else { velocity.y },
                    );
                }
            }
        }
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> (f32, bool) {
    if value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}
