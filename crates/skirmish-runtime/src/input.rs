//! Device input state buffered between ticks

use serde::{Deserialize, Serialize};
use skirmish_core::Key;
use std::collections::{BTreeMap, HashSet};
use winit::keyboard::KeyCode;

/// Key bindings: abstract key -> physical keys that produce it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<Key, Vec<KeyCode>>);

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(Key::Up, vec![KeyCode::ArrowUp, KeyCode::KeyW]);
        map.insert(Key::Down, vec![KeyCode::ArrowDown, KeyCode::KeyS]);
        map.insert(Key::Left, vec![KeyCode::ArrowLeft, KeyCode::KeyA]);
        map.insert(Key::Right, vec![KeyCode::ArrowRight, KeyCode::KeyD]);
        map.insert(Key::Attack, vec![KeyCode::Space, KeyCode::KeyJ]);
        Self(map)
    }
}

impl KeyBindings {
    /// Bindings with no keys mapped
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Bind a key to one or more physical keys, replacing the previous binding
    pub fn bind(&mut self, key: Key, codes: Vec<KeyCode>) {
        self.0.insert(key, codes);
    }

    pub fn codes(&self, key: Key) -> &[KeyCode] {
        self.0.get(&key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Is any physical key bound to `key` held on `keyboard`?
    pub fn is_pressed(&self, key: Key, keyboard: &KeyboardState) -> bool {
        self.codes(key).iter().any(|c| keyboard.is_key_down(*c))
    }
}

/// Tracks which physical keys are held
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, code: KeyCode) {
        self.keys_down.insert(code);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, code: KeyCode) {
        self.keys_down.remove(&code);
    }

    /// Release every key (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    /// Is a physical key currently held down?
    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }
}

/// Analog axes in the standard gamepad layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY = 1,
    RightX = 2,
    RightY = 3,
}

/// Buttons in the standard gamepad layout; discriminants are button indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadButton {
    South = 0,
    East = 1,
    West = 2,
    North = 3,
    LeftBumper = 4,
    RightBumper = 5,
    LeftTrigger = 6,
    RightTrigger = 7,
    Select = 8,
    Start = 9,
    LeftStick = 10,
    RightStick = 11,
    DPadUp = 12,
    DPadDown = 13,
    DPadLeft = 14,
    DPadRight = 15,
}

/// Polled state of one connected gamepad
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    axes: Vec<f32>,
    buttons: Vec<f32>,
}

impl GamepadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw axis value; axes the pad does not report read as 0
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes.get(axis as usize).copied().unwrap_or(0.0)
    }

    pub fn set_axis(&mut self, axis: GamepadAxis, value: f32) {
        let index = axis as usize;
        if self.axes.len() <= index {
            self.axes.resize(index + 1, 0.0);
        }
        self.axes[index] = value;
    }

    /// Button value in 0..=1 (analog triggers report partial values)
    pub fn button_value(&self, button: GamepadButton) -> f32 {
        self.buttons.get(button as usize).copied().unwrap_or(0.0)
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.button_value(button) > 0.0
    }

    pub fn set_button(&mut self, button: GamepadButton, value: f32) {
        let index = button as usize;
        if self.buttons.len() <= index {
            self.buttons.resize(index + 1, 0.0);
        }
        self.buttons[index] = value;
    }

    pub fn press(&mut self, button: GamepadButton) {
        self.set_button(button, 1.0);
    }

    pub fn release(&mut self, button: GamepadButton) {
        self.set_button(button, 0.0);
    }
}

/// Pointer events in world coordinates, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { world_x: f32, world_y: f32 },
    Move { world_x: f32, world_y: f32 },
    Up,
    /// Released outside the game surface
    UpOutside,
}

/// Everything the input systems poll during a tick.
///
/// Hosts feed device events in between ticks and call
/// [`end_frame`](DeviceState::end_frame) after each tick to drop the
/// consumed pointer and wheel events. Held keys and gamepad state persist.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    pub keyboard: Option<KeyboardState>,
    pub gamepad: Option<GamepadState>,
    pointer_events: Vec<PointerEvent>,
    wheel_deltas: Vec<f32>,
}

impl DeviceState {
    /// No devices at all
    pub fn new() -> Self {
        Self::default()
    }

    /// A keyboard and no gamepad
    pub fn with_keyboard() -> Self {
        Self {
            keyboard: Some(KeyboardState::new()),
            ..Self::default()
        }
    }

    pub fn connect_gamepad(&mut self, pad: GamepadState) {
        self.gamepad = Some(pad);
    }

    pub fn disconnect_gamepad(&mut self) {
        self.gamepad = None;
    }

    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.pointer_events.push(event);
    }

    /// Record a wheel delta; positive values scroll down
    pub fn push_wheel(&mut self, delta_y: f32) {
        self.wheel_deltas.push(delta_y);
    }

    /// Pointer events received since the last `end_frame`, oldest first
    pub fn pointer_events(&self) -> &[PointerEvent] {
        &self.pointer_events
    }

    pub fn wheel_deltas(&self) -> &[f32] {
        &self.wheel_deltas
    }

    /// Call at end of tick to clear per-frame events
    pub fn end_frame(&mut self) {
        self.pointer_events.clear();
        self.wheel_deltas.clear();
    }
}
