//! Component types attached to game entities
//!
//! Every component kind the simulation knows about is listed in
//! [`ComponentKind`]; each struct reports its kind's name through
//! [`skirmish_ecs::Component`] so missing-component errors read the same
//! everywhere.

use skirmish_core::{Direction, EntityId, Key, Rect, Vec2};
use skirmish_ecs::Component;
use skirmish_physics::BodyHandle;
use std::collections::BTreeSet;
use std::fmt;

/// The closed set of component kinds
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ComponentKind {
    Physics,
    Velocity,
    DesiredVelocity,
    Input,
    LeftStick,
    RightStick,
    MouseDrag,
    MouseWheel,
    Camera,
    Facing,
    Hitbox,
    HitReceiver,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Physics,
        ComponentKind::Velocity,
        ComponentKind::DesiredVelocity,
        ComponentKind::Input,
        ComponentKind::LeftStick,
        ComponentKind::RightStick,
        ComponentKind::MouseDrag,
        ComponentKind::MouseWheel,
        ComponentKind::Camera,
        ComponentKind::Facing,
        ComponentKind::Hitbox,
        ComponentKind::HitReceiver,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Physics => "physics",
            ComponentKind::Velocity => "velocity",
            ComponentKind::DesiredVelocity => "desiredVelocity",
            ComponentKind::Input => "input",
            ComponentKind::LeftStick => "leftStick",
            ComponentKind::RightStick => "rightStick",
            ComponentKind::MouseDrag => "mouseDrag",
            ComponentKind::MouseWheel => "mouseWheel",
            ComponentKind::Camera => "camera",
            ComponentKind::Facing => "facing",
            ComponentKind::Hitbox => "hitbox",
            ComponentKind::HitReceiver => "hitReceiver",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! component_kind {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Component for $ty {
                const NAME: &'static str = ComponentKind::$ty.name();
            }
        )*
    };
}

component_kind!(
    Physics,
    Velocity,
    DesiredVelocity,
    Input,
    LeftStick,
    RightStick,
    MouseDrag,
    MouseWheel,
    Camera,
    Facing,
    Hitbox,
    HitReceiver,
);

/// Handle to the entity's body in the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub body: BodyHandle,
}

impl Physics {
    pub fn new(body: BodyHandle) -> Self {
        Self { body }
    }
}

/// Configured movement speed in pixels per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub speed: f32,
}

impl Velocity {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
        }
    }
}

/// Movement intent for the current tick, in pixels per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DesiredVelocity {
    pub x: f32,
    pub y: f32,
}

impl DesiredVelocity {
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn reset(&mut self) {
        self.set(0.0, 0.0);
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Abstract keys active this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    keys: BTreeSet<Key>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn remove(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn has(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First held direction in precedence order (Up, Down, Left, Right)
    pub fn direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| self.has(dir.key()))
    }
}

/// Zero out values whose magnitude is under the deadzone
fn filter_axis(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Filtered left analog stick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftStick {
    pub x_axis: f32,
    pub y_axis: f32,
    pub enabled: bool,
    pub deadzone: f32,
}

impl Default for LeftStick {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl LeftStick {
    pub fn new(deadzone: f32) -> Self {
        Self {
            x_axis: 0.0,
            y_axis: 0.0,
            enabled: true,
            deadzone,
        }
    }

    pub fn set_axes(&mut self, x: f32, y: f32) {
        self.x_axis = filter_axis(x, self.deadzone);
        self.y_axis = filter_axis(y, self.deadzone);
    }
}

/// Filtered right analog stick, used for camera panning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightStick {
    pub x_axis: f32,
    pub y_axis: f32,
    pub enabled: bool,
    pub deadzone: f32,
}

impl Default for RightStick {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl RightStick {
    pub fn new(deadzone: f32) -> Self {
        Self {
            x_axis: 0.0,
            y_axis: 0.0,
            enabled: true,
            deadzone,
        }
    }

    pub fn set_axes(&mut self, x: f32, y: f32) {
        self.x_axis = filter_axis(x, self.deadzone);
        self.y_axis = filter_axis(y, self.deadzone);
    }

    pub fn is_idle(&self) -> bool {
        self.x_axis == 0.0 && self.y_axis == 0.0
    }
}

/// Pointer state fed by the pointer system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseDrag {
    pub pointer_down: bool,
    pub last_world_x: f32,
    pub last_world_y: f32,
    pub enabled: bool,
}

impl Default for MouseDrag {
    fn default() -> Self {
        Self {
            pointer_down: false,
            last_world_x: 0.0,
            last_world_y: 0.0,
            enabled: true,
        }
    }
}

impl MouseDrag {
    pub fn pointer(&self) -> Vec2 {
        Vec2::new(self.last_world_x, self.last_world_y)
    }
}

/// Wheel delta accumulated since the zoom system last consumed it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheel {
    pub accumulated_delta_y: f32,
    pub enabled: bool,
}

impl Default for MouseWheel {
    fn default() -> Self {
        Self {
            accumulated_delta_y: 0.0,
            enabled: true,
        }
    }
}

impl MouseWheel {
    pub fn add_delta(&mut self, delta_y: f32) {
        self.accumulated_delta_y += delta_y;
    }

    /// Take the accumulated delta, leaving zero behind
    pub fn consume_delta(&mut self) -> f32 {
        std::mem::take(&mut self.accumulated_delta_y)
    }
}

/// What the camera is currently doing, derived from `fixed` and `dragging`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Following,
    Dragging,
    Free,
}

/// Camera control state for an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    pub dragging: bool,
    pub drag_start_x: f32,
    pub drag_start_y: f32,
    /// When set (and not dragging) the viewport follows `target`
    pub fixed: bool,
    pub target: Option<EntityId>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0, 0.5, 3.0)
    }
}

impl Camera {
    /// Smallest zoom any camera accepts
    pub const MIN_ZOOM_FLOOR: f32 = 0.05;

    /// Build a camera; the initial zoom is clamped into the range.
    /// Bounds below [`MIN_ZOOM_FLOOR`](Self::MIN_ZOOM_FLOOR) are raised to it.
    pub fn new(zoom: f32, min_zoom: f32, max_zoom: f32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        let min_zoom = min_zoom.max(Self::MIN_ZOOM_FLOOR);
        let max_zoom = max_zoom.max(min_zoom);
        Self {
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            dragging: false,
            drag_start_x: 0.0,
            drag_start_y: 0.0,
            fixed: true,
            target: None,
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn start_drag(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.drag_start_x = x;
        self.drag_start_y = y;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    pub fn drag_start(&self) -> Vec2 {
        Vec2::new(self.drag_start_x, self.drag_start_y)
    }

    pub fn mode(&self) -> CameraMode {
        if self.dragging {
            CameraMode::Dragging
        } else if self.fixed {
            CameraMode::Following
        } else {
            CameraMode::Free
        }
    }
}

/// Direction the entity last faced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Facing {
    pub direction: Direction,
    /// Clock time (ms) of the last direction change
    pub last_updated_at: f64,
}

impl Facing {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            last_updated_at: 0.0,
        }
    }

    /// Face `direction`; returns true if the direction changed
    pub fn set(&mut self, direction: Direction, now: f64) -> bool {
        if self.direction == direction {
            return false;
        }
        self.direction = direction;
        self.last_updated_at = now;
        true
    }
}

/// Melee attack area projected in front of the entity
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
    /// Offset from the entity center along the attack direction
    pub distance: f32,
    /// Active window in ms; `<= 0` stays active until disabled
    pub duration_ms: f64,
    pub debug: bool,
    pub last_direction: Option<Direction>,
    /// Rectangle placed on the last tick, recorded when `debug` is set
    pub debug_rect: Option<Rect>,
    activated_at: Option<f64>,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self::new(24.0, 12.0, 16.0)
    }
}

impl Hitbox {
    pub fn new(width: f32, height: f32, distance: f32) -> Self {
        Self {
            width,
            height,
            distance,
            duration_ms: 120.0,
            debug: false,
            last_direction: None,
            debug_rect: None,
            activated_at: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn activate(&mut self, direction: Direction, now: f64) {
        self.last_direction = Some(direction);
        self.activated_at = Some(now);
    }

    /// Clear the activation, the stored direction and the debug rectangle
    pub fn disable(&mut self) {
        self.activated_at = None;
        self.last_direction = None;
        self.debug_rect = None;
    }

    pub fn is_active(&self, now: f64) -> bool {
        match self.activated_at {
            None => false,
            Some(_) if self.duration_ms <= 0.0 => true,
            Some(at) => now - at <= self.duration_ms,
        }
    }

    pub fn activated_at(&self) -> Option<f64> {
        self.activated_at
    }

    /// Rectangle centered `distance` away from `center` along `direction`.
    /// Width and height swap when attacking up or down.
    pub fn placement(&self, center: Vec2, direction: Direction) -> Rect {
        let (width, height) = if direction.is_vertical() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        Rect::from_center(center + direction.unit() * self.distance, width, height)
    }
}

type HitHook = Box<dyn FnMut(EntityId) + Send + Sync>;

/// Target-side hit bookkeeping with an optional hook
#[derive(Default)]
pub struct HitReceiver {
    pub hits_taken: u32,
    pub last_attacker: Option<EntityId>,
    on_hit: Option<HitHook>,
}

impl fmt::Debug for HitReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitReceiver")
            .field("hits_taken", &self.hits_taken)
            .field("last_attacker", &self.last_attacker)
            .field("on_hit", &self.on_hit.is_some())
            .finish()
    }
}

impl HitReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(EntityId) + Send + Sync + 'static,
    {
        self.on_hit = Some(Box::new(hook));
        self
    }

    /// Record a hit from `attacker` and run the hook
    pub fn receive(&mut self, attacker: EntityId) {
        self.hits_taken += 1;
        self.last_attacker = Some(attacker);
        if let Some(hook) = self.on_hit.as_mut() {
            hook(attacker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_come_from_kind() {
        assert_eq!(<Camera as Component>::NAME, "camera");
        assert_eq!(<DesiredVelocity as Component>::NAME, "desiredVelocity");
        assert_eq!(ComponentKind::ALL.len(), 12);
    }

    #[test]
    fn test_camera_zoom_clamped() {
        let mut camera = Camera::new(10.0, 0.5, 3.0);
        assert_eq!(camera.zoom(), 3.0);

        camera.set_zoom(0.1);
        assert_eq!(camera.zoom(), 0.5);

        camera.set_zoom(1.5);
        assert_eq!(camera.zoom(), 1.5);
    }

    #[test]
    fn test_camera_zoom_floor() {
        let mut camera = Camera::new(1.0, 0.0, 2.0);
        assert_eq!(camera.min_zoom(), Camera::MIN_ZOOM_FLOOR);

        camera.set_zoom(0.0);
        assert_eq!(camera.zoom(), Camera::MIN_ZOOM_FLOOR);

        let camera = Camera::new(1.0, -3.0, -1.0);
        assert_eq!(camera.max_zoom(), Camera::MIN_ZOOM_FLOOR);
        assert_eq!(camera.zoom(), Camera::MIN_ZOOM_FLOOR);
    }

    #[test]
    fn test_camera_modes() {
        let mut camera = Camera::default();
        assert_eq!(camera.mode(), CameraMode::Following);

        camera.set_fixed(false);
        camera.start_drag(3.0, 4.0);
        assert_eq!(camera.mode(), CameraMode::Dragging);
        assert_eq!(camera.drag_start(), Vec2::new(3.0, 4.0));

        camera.end_drag();
        assert_eq!(camera.mode(), CameraMode::Free);
    }

    #[test]
    fn test_hitbox_window() {
        let mut hitbox = Hitbox::default();
        assert!(!hitbox.is_active(0.0));

        hitbox.activate(Direction::Left, 1000.0);
        assert!(hitbox.is_active(1120.0));
        assert!(!hitbox.is_active(1121.0));
        assert_eq!(hitbox.last_direction, Some(Direction::Left));

        hitbox.debug_rect = Some(Rect::new(0.0, 0.0, 24.0, 12.0));
        hitbox.disable();
        assert!(!hitbox.is_active(1000.0));
        assert_eq!(hitbox.last_direction, None);
        assert_eq!(hitbox.debug_rect, None);
        assert_eq!(hitbox.activated_at(), None);
    }

    #[test]
    fn test_hitbox_non_positive_duration_is_permanent() {
        let mut hitbox = Hitbox::default().with_duration(0.0);
        hitbox.activate(Direction::Right, 5.0);
        assert!(hitbox.is_active(1_000_000.0));
        hitbox.disable();
        assert!(!hitbox.is_active(5.0));
    }

    #[test]
    fn test_hitbox_placement_swaps_for_vertical() {
        let hitbox = Hitbox::new(24.0, 12.0, 16.0);
        let center = Vec2::new(100.0, 100.0);

        let right = hitbox.placement(center, Direction::Right);
        assert_eq!(right, Rect::new(104.0, 94.0, 24.0, 12.0));

        let up = hitbox.placement(center, Direction::Up);
        assert_eq!(up, Rect::new(94.0, 72.0, 12.0, 24.0));
    }

    #[test]
    fn test_stick_deadzone() {
        let mut stick = LeftStick::new(0.5);
        stick.set_axes(0.49, -0.8);
        assert_eq!(stick.x_axis, 0.0);
        assert_eq!(stick.y_axis, -0.8);
    }

    #[test]
    fn test_facing_timestamp_only_on_change() {
        let mut facing = Facing::default();
        assert!(!facing.set(Direction::Right, 50.0));
        assert_eq!(facing.last_updated_at, 0.0);

        assert!(facing.set(Direction::Up, 60.0));
        assert_eq!(facing.last_updated_at, 60.0);
    }

    #[test]
    fn test_input_direction_precedence() {
        let mut input = Input::new();
        input.add(Key::Right);
        input.add(Key::Down);
        assert_eq!(input.direction(), Some(Direction::Down));

        input.clear();
        input.add(Key::Attack);
        assert_eq!(input.direction(), None);
    }

    #[test]
    fn test_hit_receiver_hook() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let mut receiver = HitReceiver::new().with_hook(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let attacker = EntityId::from_raw(7);
        receiver.receive(attacker);
        assert_eq!(receiver.hits_taken, 1);
        assert_eq!(receiver.last_attacker, Some(attacker));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
