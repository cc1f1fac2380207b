//! System trait and per-tick context

use crate::components::Hitbox;
use crate::viewport::Viewport;
use skirmish_core::{EntityId, Result};
use skirmish_ecs::World;
use skirmish_physics::PhysicsWorld;
use skirmish_runtime::{DeviceState, EventBus, TimerQueue};

/// Which entity list a system is handed each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityScope {
    /// The player-controlled entities
    Controlled,
    /// Every entity with a physics body
    Combatants,
}

/// Work scheduled for a later tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredAction {
    /// End the hitbox activation that started at `activated_at`
    DisableHitbox {
        entity: EntityId,
        activated_at: f64,
    },
}

impl DeferredAction {
    /// Carry out the action. Entities or activations that have gone away are skipped.
    pub fn apply(self, world: &World) -> Result<()> {
        match self {
            DeferredAction::DisableHitbox {
                entity,
                activated_at,
            } => {
                if !world.contains(entity) || !world.has::<Hitbox>(entity) {
                    return Ok(());
                }
                let mut hitbox = world.get_mut::<Hitbox>(entity)?;
                if hitbox.activated_at() == Some(activated_at) {
                    hitbox.disable();
                    log::trace!("hitbox of '{}' expired", world.label(entity));
                }
                Ok(())
            }
        }
    }
}

/// Everything a system may touch during one tick
pub struct TickContext<'a> {
    /// Component storage; component borrows are checked at runtime
    pub world: &'a World,
    pub physics: &'a mut PhysicsWorld,
    pub viewport: &'a mut Viewport,
    pub devices: &'a DeviceState,
    pub timers: &'a mut TimerQueue<DeferredAction>,
    pub events: &'a mut EventBus,
    /// Clock time of this tick in milliseconds
    pub now: f64,
}

/// A system run once per tick by the [`Pipeline`](crate::Pipeline)
pub trait System {
    /// Human-readable name for this system
    fn name(&self) -> &'static str;

    /// Which entities this system iterates
    fn scope(&self) -> EntityScope {
        EntityScope::Controlled
    }

    /// Process the given entities for the current tick
    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()>;
}
