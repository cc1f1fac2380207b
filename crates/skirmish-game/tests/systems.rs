//! System-level behavior, one system at a time

use approx::assert_relative_eq;
use rstest::{fixture, rstest};
use skirmish_core::{Direction, EntityId, Key, Rect, Result, SkirmishError};
use skirmish_ecs::World;
use skirmish_game::components::{
    Camera, DesiredVelocity, Facing, Hitbox, Input, MouseDrag, Physics, RightStick, Velocity,
};
use skirmish_game::systems::{
    AttackSystem, CameraDragSystem, CameraRightStickSystem, CameraSystem, CameraZoomSystem,
    FacingSystem, KeyboardSystem, MovementSystem, PhysicsSystem,
};
use skirmish_game::{DeferredAction, System, TickContext, Viewport};
use skirmish_physics::{Body, PhysicsWorld};
use skirmish_runtime::{DeviceState, EventBus, GamepadState, KeyBindings, TimerQueue};

struct Harness {
    world: World,
    physics: PhysicsWorld,
    viewport: Viewport,
    timers: TimerQueue<DeferredAction>,
    events: EventBus,
    devices: DeviceState,
    now: f64,
}

impl Harness {
    fn run(&mut self, system: &mut dyn System, entities: &[EntityId]) -> Result<()> {
        let mut ctx = TickContext {
            world: &self.world,
            physics: &mut self.physics,
            viewport: &mut self.viewport,
            devices: &self.devices,
            timers: &mut self.timers,
            events: &mut self.events,
            now: self.now,
        };
        system.update(&mut ctx, entities)
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        world: World::new(),
        physics: PhysicsWorld::new(Rect::new(0.0, 0.0, 2048.0, 2048.0)),
        viewport: Viewport::new(800.0, 600.0),
        timers: TimerQueue::new(),
        events: EventBus::new(),
        devices: DeviceState::with_keyboard(),
        now: 0.0,
    }
}

fn assert_missing(result: Result<()>, entity: &str, component: &str) {
    match result {
        Err(SkirmishError::MissingComponent {
            entity: e,
            component: c,
        }) => {
            assert_eq!(e, entity);
            assert_eq!(c, component);
        }
        other => panic!("expected missing '{component}', got {other:?}"),
    }
}

#[rstest]
fn keyboard_requires_input(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut system = KeyboardSystem::new(&harness.devices, KeyBindings::default()).unwrap();

    let result = harness.run(&mut system, &[id]);
    let message = result.as_ref().map_err(|e| e.to_string()).err();
    assert_eq!(
        message.as_deref(),
        Some("Entity 'player' is missing required component 'input'")
    );
    assert_missing(result, "player", "input");
}

#[rstest]
fn movement_requires_velocity(mut harness: Harness) {
    let id = harness.world.spawn("hero").unwrap();
    harness.world.add(id, Input::new()).unwrap();
    harness.world.add(id, DesiredVelocity::default()).unwrap();

    assert_missing(harness.run(&mut MovementSystem, &[id]), "hero", "velocity");
}

#[rstest]
fn physics_requires_body(mut harness: Harness) {
    let id = harness.world.spawn("hero").unwrap();
    harness.world.add(id, DesiredVelocity::default()).unwrap();

    assert_missing(harness.run(&mut PhysicsSystem, &[id]), "hero", "physics");
}

#[rstest]
#[case::drag(Box::new(CameraDragSystem::default()) as Box<dyn System>)]
#[case::zoom(Box::new(CameraZoomSystem::default()) as Box<dyn System>)]
#[case::follow(Box::new(CameraSystem) as Box<dyn System>)]
#[case::right_stick(Box::new(CameraRightStickSystem::default()) as Box<dyn System>)]
fn camera_systems_require_camera(mut harness: Harness, #[case] mut system: Box<dyn System>) {
    harness.devices.connect_gamepad(GamepadState::new());
    let id = harness.world.spawn("player").unwrap();

    assert_missing(harness.run(system.as_mut(), &[id]), "player", "camera");
}

#[rstest]
#[case::unset(None)]
#[case::despawned(Some(EntityId::from_raw(999_999)))]
fn camera_follow_requires_live_target(mut harness: Harness, #[case] target: Option<EntityId>) {
    let id = harness.world.spawn("player").unwrap();
    let mut camera = Camera::default();
    camera.set_target(target);
    harness.world.add(id, camera).unwrap();

    assert_missing(harness.run(&mut CameraSystem, &[id]), "player", "camera target");
    assert_eq!(harness.viewport.following(), None);
}

#[rstest]
#[case::right(&[Key::Right], 400.0, 0.0)]
#[case::up(&[Key::Up], 0.0, -400.0)]
#[case::down_left(&[Key::Down, Key::Left], -282.842_7, 282.842_7)]
#[case::up_right(&[Key::Up, Key::Right], 282.842_7, -282.842_7)]
fn movement_speed_and_diagonals(
    mut harness: Harness,
    #[case] keys: &[Key],
    #[case] vx: f32,
    #[case] vy: f32,
) {
    let id = harness.world.spawn("player").unwrap();
    let mut input = Input::new();
    for key in keys {
        input.add(*key);
    }
    harness.world.add(id, input).unwrap();
    harness.world.add(id, Velocity::new(400.0)).unwrap();
    harness.world.add(id, DesiredVelocity::default()).unwrap();

    harness.run(&mut MovementSystem, &[id]).unwrap();

    let desired = *harness.world.get::<DesiredVelocity>(id).unwrap();
    assert_relative_eq!(desired.x, vx, epsilon = 1e-3);
    assert_relative_eq!(desired.y, vy, epsilon = 1e-3);
    assert_relative_eq!(desired.as_vec2().length(), 400.0, epsilon = 1e-3);
}

#[rstest]
fn physics_copies_intent_to_body(mut harness: Harness) {
    let body = harness.physics.add_body(Body::new(0.0, 0.0, 16.0, 16.0));
    let id = harness.world.spawn("player").unwrap();
    harness.world.add(id, Physics::new(body)).unwrap();
    harness
        .world
        .add(
            id,
            DesiredVelocity {
                x: -12.5,
                y: 3.0,
            },
        )
        .unwrap();

    harness.run(&mut PhysicsSystem, &[id]).unwrap();

    let velocity = harness.physics.body(body).unwrap().velocity();
    assert_eq!((velocity.x, velocity.y), (-12.5, 3.0));
}

fn spawn_drag_camera(harness: &mut Harness) -> EntityId {
    let id = harness.world.spawn("player").unwrap();
    harness.world.add(id, Camera::default()).unwrap();
    harness.world.add(id, MouseDrag::default()).unwrap();
    id
}

fn set_pointer(harness: &Harness, id: EntityId, down: bool, x: f32, y: f32) {
    let mut drag = harness.world.get_mut::<MouseDrag>(id).unwrap();
    drag.pointer_down = down;
    drag.last_world_x = x;
    drag.last_world_y = y;
}

#[rstest]
fn drag_press_and_release(mut harness: Harness) {
    let id = spawn_drag_camera(&mut harness);
    let mut system = CameraDragSystem::default();

    set_pointer(&harness, id, true, 10.0, 20.0);
    harness.run(&mut system, &[id]).unwrap();
    {
        let camera = harness.world.get::<Camera>(id).unwrap();
        assert!(camera.dragging);
        assert!(!camera.fixed);
        assert_eq!((camera.drag_start_x, camera.drag_start_y), (10.0, 20.0));
    }
    assert_eq!(harness.viewport.scroll_x, 0.0);

    set_pointer(&harness, id, false, 10.0, 20.0);
    harness.run(&mut system, &[id]).unwrap();
    let camera = harness.world.get::<Camera>(id).unwrap();
    assert!(!camera.dragging);
    assert!(camera.fixed);
}

#[rstest]
fn drag_scrolls_against_pointer_motion(mut harness: Harness) {
    let id = spawn_drag_camera(&mut harness);
    let mut system = CameraDragSystem::default();

    set_pointer(&harness, id, true, 10.0, 20.0);
    harness.run(&mut system, &[id]).unwrap();
    set_pointer(&harness, id, true, 20.0, 15.0);
    harness.run(&mut system, &[id]).unwrap();

    assert_relative_eq!(harness.viewport.scroll_x, -4.0, epsilon = 1e-5);
    assert_relative_eq!(harness.viewport.scroll_y, 2.0, epsilon = 1e-5);
    let camera = harness.world.get::<Camera>(id).unwrap();
    assert_eq!(camera.drag_start_x, 20.0);
}

#[rstest]
fn pointer_motion_without_drag_leaves_scroll(mut harness: Harness) {
    let id = spawn_drag_camera(&mut harness);
    let mut system = CameraDragSystem::default();

    set_pointer(&harness, id, false, 50.0, 60.0);
    harness.run(&mut system, &[id]).unwrap();

    assert_eq!(harness.viewport.scroll(), skirmish_core::Vec2::ZERO);
    assert!(!harness.world.get::<Camera>(id).unwrap().dragging);
}

fn spawn_stick_camera(harness: &mut Harness) -> EntityId {
    harness.devices.connect_gamepad(GamepadState::new());
    let id = harness.world.spawn("player").unwrap();
    harness.world.add(id, Camera::default()).unwrap();
    harness.world.add(id, RightStick::default()).unwrap();
    id
}

fn push_stick(harness: &Harness, id: EntityId, x: f32) {
    harness.world.get_mut::<RightStick>(id).unwrap().set_axes(x, 0.0);
}

#[rstest]
fn right_stick_pan_is_capped(mut harness: Harness) {
    let id = spawn_stick_camera(&mut harness);
    let mut system = CameraRightStickSystem::default();

    push_stick(&harness, id, 1.0);
    for _ in 0..30 {
        harness.run(&mut system, &[id]).unwrap();
    }

    assert_eq!(harness.viewport.scroll_x, 224.0);
    assert!(!harness.world.get::<Camera>(id).unwrap().fixed);
}

#[rstest]
fn right_stick_release_resets_counter(mut harness: Harness) {
    let id = spawn_stick_camera(&mut harness);
    let mut system = CameraRightStickSystem::default();

    push_stick(&harness, id, 1.0);
    for _ in 0..10 {
        harness.run(&mut system, &[id]).unwrap();
    }
    push_stick(&harness, id, 0.0);
    harness.run(&mut system, &[id]).unwrap();
    assert!(harness.world.get::<Camera>(id).unwrap().fixed);

    push_stick(&harness, id, 1.0);
    harness.run(&mut system, &[id]).unwrap();

    assert_eq!(harness.viewport.scroll_x, 88.0);
}

#[rstest]
fn right_stick_without_gamepad_is_noop(mut harness: Harness) {
    let id = spawn_stick_camera(&mut harness);
    harness.devices.disconnect_gamepad();
    push_stick(&harness, id, 1.0);

    harness
        .run(&mut CameraRightStickSystem::default(), &[id])
        .unwrap();
    assert_eq!(harness.viewport.scroll_x, 0.0);
}

#[rstest]
fn facing_persists_when_idle(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut input = Input::new();
    input.add(Key::Up);
    harness.world.add(id, input).unwrap();
    harness.world.add(id, Facing::default()).unwrap();

    harness.now = 100.0;
    harness.run(&mut FacingSystem, &[id]).unwrap();
    assert_eq!(
        harness.world.get::<Facing>(id).unwrap().direction,
        Direction::Up
    );

    harness.world.get_mut::<Input>(id).unwrap().clear();
    harness.now = 200.0;
    harness.run(&mut FacingSystem, &[id]).unwrap();

    let facing = harness.world.get::<Facing>(id).unwrap();
    assert_eq!(facing.direction, Direction::Up);
    assert_eq!(facing.last_updated_at, 100.0);
}

#[rstest]
#[case::horizontal_tie(5.0, 5.0, Direction::Right)]
#[case::vertical(1.0, -3.0, Direction::Up)]
#[case::left(-2.0, 1.0, Direction::Left)]
fn facing_from_desired_velocity(
    mut harness: Harness,
    #[case] x: f32,
    #[case] y: f32,
    #[case] expected: Direction,
) {
    let id = harness.world.spawn("npc").unwrap();
    harness.world.add(id, DesiredVelocity { x, y }).unwrap();
    harness.world.add(id, Facing::new(Direction::Down)).unwrap();

    harness.run(&mut FacingSystem, &[id]).unwrap();
    assert_eq!(harness.world.get::<Facing>(id).unwrap().direction, expected);
}

#[rstest]
fn facing_prefers_input_over_desired_velocity(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut input = Input::new();
    input.add(Key::Up);
    harness.world.add(id, input).unwrap();
    harness.world.add(id, DesiredVelocity { x: 5.0, y: 0.0 }).unwrap();
    harness.world.add(id, Facing::new(Direction::Down)).unwrap();

    harness.run(&mut FacingSystem, &[id]).unwrap();
    assert_eq!(
        harness.world.get::<Facing>(id).unwrap().direction,
        Direction::Up
    );
}

#[rstest]
fn attack_uses_facing_and_schedules_disable(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut input = Input::new();
    input.add(Key::Attack);
    input.add(Key::Down);
    harness.world.add(id, input).unwrap();
    harness.world.add(id, Facing::new(Direction::Left)).unwrap();
    harness.world.add(id, Hitbox::default()).unwrap();

    harness.now = 500.0;
    harness.run(&mut AttackSystem, &[id]).unwrap();

    {
        let hitbox = harness.world.get::<Hitbox>(id).unwrap();
        assert_eq!(hitbox.last_direction, Some(Direction::Left));
        assert!(hitbox.is_active(620.0));
        assert!(!hitbox.is_active(621.0));
    }
    assert_eq!(
        harness.timers.drain_due(620.0),
        vec![DeferredAction::DisableHitbox {
            entity: id,
            activated_at: 500.0
        }]
    );
}

#[rstest]
fn attack_without_facing_reads_input(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut input = Input::new();
    input.add(Key::Attack);
    input.add(Key::Down);
    harness.world.add(id, input).unwrap();
    harness
        .world
        .add(id, Hitbox::default().with_duration(0.0))
        .unwrap();

    harness.run(&mut AttackSystem, &[id]).unwrap();

    let hitbox = harness.world.get::<Hitbox>(id).unwrap();
    assert_eq!(hitbox.last_direction, Some(Direction::Down));
    assert!(hitbox.is_active(1.0e9));
    assert!(harness.timers.is_empty());
}

#[rstest]
fn stale_disable_keeps_newer_activation(mut harness: Harness) {
    let id = harness.world.spawn("player").unwrap();
    let mut hitbox = Hitbox::default();
    hitbox.activate(Direction::Right, 300.0);
    harness.world.add(id, hitbox).unwrap();

    DeferredAction::DisableHitbox {
        entity: id,
        activated_at: 100.0,
    }
    .apply(&harness.world)
    .unwrap();
    assert!(harness.world.get::<Hitbox>(id).unwrap().is_active(310.0));

    DeferredAction::DisableHitbox {
        entity: id,
        activated_at: 300.0,
    }
    .apply(&harness.world)
    .unwrap();
    assert!(!harness.world.get::<Hitbox>(id).unwrap().is_active(310.0));
}
