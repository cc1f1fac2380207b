//! Combat: facing, attack activation and hit detection

use crate::components::{DesiredVelocity, Facing, HitReceiver, Hitbox, Input, Physics};
use crate::system::{DeferredAction, EntityScope, System, TickContext};
use skirmish_core::{Direction, EntityId, Key, Result};
use skirmish_runtime::GameEvent;

/// Handler invoked as `(attacker, target)` when a hitbox lands
pub type HitHandler = Box<dyn FnMut(EntityId, EntityId)>;

/// Direction implied by a movement vector; ties go horizontal
fn direction_of(x: f32, y: f32) -> Option<Direction> {
    if x == 0.0 && y == 0.0 {
        return None;
    }
    let dir = if x.abs() >= y.abs() {
        if x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}

/// Updates `Facing` from input, falling back to movement intent
pub struct FacingSystem;

impl System for FacingSystem {
    fn name(&self) -> &'static str {
        "facing"
    }

    fn scope(&self) -> EntityScope {
        EntityScope::Combatants
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            if !ctx.world.has::<Facing>(id) {
                continue;
            }

            let from_input = if ctx.world.has::<Input>(id) {
                ctx.world.get::<Input>(id)?.direction()
            } else {
                None
            };
            let direction = match from_input {
                Some(dir) => Some(dir),
                None if ctx.world.has::<DesiredVelocity>(id) => {
                    let desired = ctx.world.get::<DesiredVelocity>(id)?;
                    direction_of(desired.x, desired.y)
                }
                None => None,
            };

            if let Some(direction) = direction {
                let mut facing = ctx.world.get_mut::<Facing>(id)?;
                if facing.set(direction, ctx.now) {
                    log::trace!("'{}' now facing {}", ctx.world.label(id), direction);
                }
            }
        }
        Ok(())
    }
}

/// Starts hitbox activations when Attack is held
pub struct AttackSystem;

impl System for AttackSystem {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn scope(&self) -> EntityScope {
        EntityScope::Combatants
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            if !ctx.world.has::<Input>(id) || !ctx.world.has::<Hitbox>(id) {
                continue;
            }

            let input = ctx.world.get::<Input>(id)?;
            let mut hitbox = ctx.world.get_mut::<Hitbox>(id)?;
            if !input.has(Key::Attack) || hitbox.is_active(ctx.now) {
                continue;
            }

            let direction = if ctx.world.has::<Facing>(id) {
                ctx.world.get::<Facing>(id)?.direction
            } else {
                input.direction().unwrap_or_default()
            };

            hitbox.activate(direction, ctx.now);
            if hitbox.duration_ms > 0.0 {
                ctx.timers.schedule(
                    ctx.now + hitbox.duration_ms,
                    DeferredAction::DisableHitbox {
                        entity: id,
                        activated_at: ctx.now,
                    },
                );
            }
            log::debug!(
                "'{}' attacks {} at {}ms",
                ctx.world.label(id),
                direction,
                ctx.now
            );
        }
        Ok(())
    }
}

/// Places active hitboxes and resolves the first target they overlap
#[derive(Default)]
pub struct HitboxSystem {
    on_hit: Option<HitHandler>,
}

impl HitboxSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route hits to `handler` instead of the targets' `HitReceiver`
    pub fn with_handler(handler: HitHandler) -> Self {
        Self {
            on_hit: Some(handler),
        }
    }
}

impl System for HitboxSystem {
    fn name(&self) -> &'static str {
        "hitbox"
    }

    fn scope(&self) -> EntityScope {
        EntityScope::Combatants
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &attacker in entities {
            if !ctx.world.has::<Hitbox>(attacker) || !ctx.world.has::<Physics>(attacker) {
                continue;
            }

            let area = {
                let mut hitbox = ctx.world.get_mut::<Hitbox>(attacker)?;
                if !hitbox.is_active(ctx.now) {
                    hitbox.debug_rect = None;
                    continue;
                }

                let direction = match hitbox.last_direction {
                    Some(dir) => dir,
                    None if ctx.world.has::<Facing>(attacker) => {
                        ctx.world.get::<Facing>(attacker)?.direction
                    }
                    None => Direction::Right,
                };

                let body = ctx.world.get::<Physics>(attacker)?.body;
                let center = ctx.physics.body(body)?.center();
                let area = hitbox.placement(center, direction).rounded();
                if hitbox.debug {
                    hitbox.debug_rect = Some(area);
                }
                area
            };

            let mut struck = None;
            for &target in entities {
                if target == attacker || !ctx.world.has::<Physics>(target) {
                    continue;
                }
                let body = ctx.world.get::<Physics>(target)?.body;
                let bounds = ctx.physics.body(body)?.rect().rounded();
                if area.intersects(&bounds) {
                    struck = Some(target);
                    break;
                }
            }

            let Some(target) = struck else {
                continue;
            };

            log::debug!(
                "'{}' hit '{}'",
                ctx.world.label(attacker),
                ctx.world.label(target)
            );
            if let Some(handler) = self.on_hit.as_mut() {
                handler(attacker, target);
            } else if ctx.world.has::<HitReceiver>(target) {
                ctx.world.get_mut::<HitReceiver>(target)?.receive(attacker);
            }
            ctx.events.publish(GameEvent::Hit { attacker, target });
            ctx.world.get_mut::<Hitbox>(attacker)?.disable();
        }
        Ok(())
    }
}
