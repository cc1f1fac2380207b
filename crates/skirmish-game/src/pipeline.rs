//! The fixed per-tick system schedule

use crate::config::GameConfig;
use crate::system::{EntityScope, System, TickContext};
use crate::systems::{
    AttackSystem, CameraDragSystem, CameraRightStickSystem, CameraSystem, CameraZoomSystem,
    FacingSystem, GamepadSystem, HitHandler, HitboxSystem, KeyboardSystem, MouseWheelSystem,
    MovementSystem, PhysicsSystem, PointerSystem,
};
use skirmish_core::{EntityId, Result};
use skirmish_runtime::DeviceState;

/// Runs every system once per tick, always in the same order.
///
/// Input is gathered before movement, movement before the camera, and
/// facing is settled before an attack picks its direction and before the
/// hitbox is placed.
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
}

impl Pipeline {
    /// Build the schedule. Fails with `MissingDependency` when no keyboard is attached.
    pub fn new(
        config: &GameConfig,
        devices: &DeviceState,
        on_hit: Option<HitHandler>,
    ) -> Result<Self> {
        let camera = &config.camera;
        let hitbox = match on_hit {
            Some(handler) => HitboxSystem::with_handler(handler),
            None => HitboxSystem::new(),
        };

        let systems: Vec<Box<dyn System>> = vec![
            Box::new(KeyboardSystem::new(devices, config.input.bindings.clone())?),
            Box::new(GamepadSystem::new(config.input.button_threshold)),
            Box::new(MouseWheelSystem),
            Box::new(PointerSystem),
            Box::new(MovementSystem),
            Box::new(PhysicsSystem),
            Box::new(CameraDragSystem::new(
                camera.drag_multiplier,
                camera.drag_smooth_factor,
            )),
            Box::new(CameraRightStickSystem::new(camera.pan_step, camera.pan_cap)),
            Box::new(CameraZoomSystem::new(camera.zoom_step)),
            Box::new(CameraSystem),
            Box::new(FacingSystem),
            Box::new(AttackSystem),
            Box::new(hitbox),
        ];

        Ok(Self { systems })
    }

    /// System names in execution order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Fire due deferred actions, then run every system once
    pub fn run(
        &mut self,
        ctx: &mut TickContext<'_>,
        controlled: &[EntityId],
        combatants: &[EntityId],
    ) -> Result<()> {
        for action in ctx.timers.drain_due(ctx.now) {
            action.apply(ctx.world)?;
        }

        for system in self.systems.iter_mut() {
            let entities = match system.scope() {
                EntityScope::Controlled => controlled,
                EntityScope::Combatants => combatants,
            };
            log::trace!("running '{}' on {} entities", system.name(), entities.len());
            system.update(ctx, entities)?;
        }
        Ok(())
    }
}
