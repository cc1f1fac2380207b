//! Entity factories

use crate::components::{
    Camera, DesiredVelocity, Facing, HitReceiver, Hitbox, Input, LeftStick, MouseDrag, MouseWheel,
    Physics, RightStick, Velocity,
};
use crate::config::GameConfig;
use skirmish_core::{EntityId, Rect, Result, Vec2};
use skirmish_ecs::World;
use skirmish_physics::{Body, PhysicsWorld};

/// Spawn the player with its full component set, centered on the configured spawn point
pub fn spawn_player(
    world: &mut World,
    physics: &mut PhysicsWorld,
    config: &GameConfig,
) -> Result<EntityId> {
    let player = &config.player;
    let id = world.spawn("player")?;
    let body = physics.add_body(Body::centered_at(
        Vec2::new(player.spawn_x, player.spawn_y),
        player.body_width,
        player.body_height,
    ));

    world.add(id, Physics::new(body))?;
    world.add(id, Velocity::new(player.speed))?;
    world.add(id, DesiredVelocity::default())?;
    world.add(id, Input::new())?;
    world.add(id, LeftStick::new(config.input.left_stick_deadzone))?;
    world.add(id, RightStick::new(config.input.right_stick_deadzone))?;
    world.add(id, MouseDrag::default())?;
    world.add(id, MouseWheel::default())?;
    world.add(
        id,
        Camera::new(
            config.camera.zoom,
            config.camera.min_zoom,
            config.camera.max_zoom,
        )
        .with_target(id),
    )?;
    world.add(id, Facing::default())?;
    world.add(
        id,
        Hitbox::new(
            config.hitbox.width,
            config.hitbox.height,
            config.hitbox.distance,
        )
        .with_duration(config.hitbox.duration_ms)
        .with_debug(config.hitbox.debug),
    )?;

    log::debug!("spawned player at ({}, {})", player.spawn_x, player.spawn_y);
    Ok(id)
}

/// Spawn a static target that records the hits it takes
pub fn spawn_dummy(
    world: &mut World,
    physics: &mut PhysicsWorld,
    name: &str,
    area: Rect,
) -> Result<EntityId> {
    let id = world.spawn(name)?;
    let body = physics.add_body(Body::new(area.x, area.y, area.width, area.height));
    world.add(id, Physics::new(body))?;
    world.add(id, HitReceiver::new())?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_body_centered_on_spawn() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Rect::new(0.0, 0.0, 2048.0, 2048.0));
        let id = spawn_player(&mut world, &mut physics, &GameConfig::default()).unwrap();

        let body = world.get::<Physics>(id).unwrap().body;
        assert_eq!(physics.body(body).unwrap().center(), Vec2::new(400.0, 300.0));
        assert_eq!(world.get::<Velocity>(id).unwrap().speed, 400.0);
        assert_eq!(world.get::<Camera>(id).unwrap().target, Some(id));
    }

    #[test]
    fn test_dummy_names_must_be_unique() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let area = Rect::new(10.0, 10.0, 16.0, 16.0);

        spawn_dummy(&mut world, &mut physics, "dummy", area).unwrap();
        assert!(spawn_dummy(&mut world, &mut physics, "dummy", area).is_err());
    }
}
