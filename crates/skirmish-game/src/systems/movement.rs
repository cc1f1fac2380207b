//! Movement intent and its hand-off to the physics bodies

use crate::components::{DesiredVelocity, Input, Physics, Velocity};
use crate::system::{System, TickContext};
use skirmish_core::{EntityId, Key, Result};
use std::f32::consts::FRAC_1_SQRT_2;

/// Turns held directions into a `DesiredVelocity`
pub struct MovementSystem;

impl MovementSystem {
    /// Velocity for the held keys at `speed`, normalized on diagonals
    pub fn resolve(input: &Input, speed: f32) -> (f32, f32) {
        let axis = |neg: Key, pos: Key| -> f32 {
            (input.has(pos) as i8 - input.has(neg) as i8) as f32
        };
        let mut vx = speed * axis(Key::Left, Key::Right);
        let mut vy = speed * axis(Key::Up, Key::Down);

        if vx != 0.0 && vy != 0.0 {
            vx *= FRAC_1_SQRT_2;
            vy *= FRAC_1_SQRT_2;
        }
        (vx, vy)
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            let input = ctx.world.get::<Input>(id)?;
            let velocity = ctx.world.get::<Velocity>(id)?;
            let mut desired = ctx.world.get_mut::<DesiredVelocity>(id)?;

            let (vx, vy) = Self::resolve(&input, velocity.speed);
            desired.set(vx, vy);
        }
        Ok(())
    }
}

/// Copies `DesiredVelocity` into the entity's physics body
pub struct PhysicsSystem;

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            let desired = *ctx.world.get::<DesiredVelocity>(id)?;
            let body = ctx.world.get::<Physics>(id)?.body;

            ctx.physics.body_mut(body)?.set_velocity(desired.x, desired.y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = Input::new();
        input.add(Key::Left);
        input.add(Key::Right);
        input.add(Key::Down);
        assert_eq!(MovementSystem::resolve(&input, 400.0), (0.0, 400.0));
    }

    #[test]
    fn test_idle_is_zero() {
        assert_eq!(MovementSystem::resolve(&Input::new(), 400.0), (0.0, 0.0));
    }
}
