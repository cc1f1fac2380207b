//! Skirmish Runtime - Tick infrastructure
//!
//! Provides the building blocks the simulation is driven by:
//! - `GameClock` - deterministic millisecond clock advanced once per tick
//! - `DeviceState` - buffered keyboard, gamepad, pointer and wheel state
//! - `GameEvent` / `EventBus` - typed publish/subscribe channel for the overlay
//! - `TimerQueue` - delayed actions fired when the clock passes their due time

mod clock;
mod event;
mod event_bus;
mod input;
mod timer;

pub use clock::GameClock;
pub use event::{EventKind, GameEvent};
pub use event_bus::{EventBus, ListenerId};
pub use input::{
    DeviceState, GamepadAxis, GamepadButton, GamepadState, KeyBindings, KeyboardState,
    PointerEvent,
};
pub use timer::TimerQueue;

pub use winit::keyboard::KeyCode;
