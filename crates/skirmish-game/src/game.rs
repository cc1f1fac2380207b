//! The game facade hosts drive once per frame

use crate::components::{Camera, DesiredVelocity, Facing, Hitbox, Input, Physics};
use crate::config::GameConfig;
use crate::factory;
use crate::pipeline::Pipeline;
use crate::system::{DeferredAction, TickContext};
use crate::systems::HitHandler;
use crate::viewport::Viewport;
use skirmish_core::{Direction, EntityId, Key, Rect, Result, Vec2};
use skirmish_ecs::World;
use skirmish_physics::PhysicsWorld;
use skirmish_runtime::{DeviceState, EventBus, GameClock, GameEvent, TimerQueue};

/// Read-only snapshot of the player for rendering and animation
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    /// Body center in world coordinates
    pub position: Vec2,
    pub facing: Direction,
    pub keys: Vec<Key>,
    pub moving: bool,
    pub attacking: bool,
}

/// One running simulation: entities, physics, viewport, clock and schedule
pub struct Game {
    config: GameConfig,
    world: World,
    physics: PhysicsWorld,
    viewport: Viewport,
    clock: GameClock,
    timers: TimerQueue<DeferredAction>,
    events: EventBus,
    pipeline: Pipeline,
    player: EntityId,
    paused: bool,
}

impl Game {
    /// Validate the config, build the schedule and spawn the player
    pub fn new(config: GameConfig, devices: &DeviceState) -> Result<Self> {
        Self::build(config, devices, None)
    }

    /// Like [`new`](Game::new), routing every hit to `handler`
    pub fn with_hit_handler(
        config: GameConfig,
        devices: &DeviceState,
        handler: HitHandler,
    ) -> Result<Self> {
        Self::build(config, devices, Some(handler))
    }

    fn build(config: GameConfig, devices: &DeviceState, on_hit: Option<HitHandler>) -> Result<Self> {
        config.validate()?;
        let pipeline = Pipeline::new(&config, devices, on_hit)?;

        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Rect::new(
            0.0,
            0.0,
            config.world.width,
            config.world.height,
        ));
        let player = factory::spawn_player(&mut world, &mut physics, &config)?;

        let mut viewport = Viewport::new(config.camera.viewport_width, config.camera.viewport_height);
        viewport.set_zoom(world.get::<Camera>(player)?.zoom());

        Ok(Self {
            config,
            world,
            physics,
            viewport,
            clock: GameClock::new(),
            timers: TimerQueue::new(),
            events: EventBus::new(),
            pipeline,
            player,
            paused: false,
        })
    }

    /// Advance the clock by `dt_ms`, run the schedule, then step physics.
    /// A paused game only advances its clock.
    pub fn tick(&mut self, devices: &DeviceState, dt_ms: f64) -> Result<()> {
        self.clock.advance(dt_ms);
        if self.paused {
            return Ok(());
        }

        let controlled = [self.player];
        let combatants: Vec<EntityId> = self
            .world
            .entity_ids()
            .into_iter()
            .filter(|id| self.world.has::<Physics>(*id))
            .collect();

        let mut ctx = TickContext {
            world: &self.world,
            physics: &mut self.physics,
            viewport: &mut self.viewport,
            devices,
            timers: &mut self.timers,
            events: &mut self.events,
            now: self.clock.now(),
        };
        self.pipeline.run(&mut ctx, &controlled, &combatants)?;

        self.physics.step(self.clock.delta_secs() as f32);
        Ok(())
    }

    /// Spawn a static target at `area`
    pub fn spawn_dummy(&mut self, name: &str, area: Rect) -> Result<EntityId> {
        factory::spawn_dummy(&mut self.world, &mut self.physics, name, area)
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        log::debug!("game {}", if paused { "paused" } else { "resumed" });
        self.events.publish(GameEvent::PauseChanged { paused });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_view(&self) -> Result<PlayerView> {
        let id = self.player;
        let body = self.world.get::<Physics>(id)?.body;
        let position = self.physics.body(body)?.center();
        let keys = self.world.get::<Input>(id)?.keys().collect();

        Ok(PlayerView {
            position,
            facing: self.world.get::<Facing>(id)?.direction,
            keys,
            moving: !self.world.get::<DesiredVelocity>(id)?.is_zero(),
            attacking: self.world.get::<Hitbox>(id)?.is_active(self.clock.now()),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Number of deferred actions still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
