//! Device aggregation: keyboard, gamepad, wheel and pointer

use crate::components::{Input, LeftStick, MouseDrag, MouseWheel, RightStick};
use crate::system::{System, TickContext};
use skirmish_core::{EntityId, Key, Result, SkirmishError};
use skirmish_runtime::{DeviceState, GamepadAxis, GamepadButton, KeyBindings, PointerEvent};

/// Rebuilds `Input` from held keyboard keys
pub struct KeyboardSystem {
    bindings: KeyBindings,
}

impl KeyboardSystem {
    /// Fails with `MissingDependency` when no keyboard is attached
    pub fn new(devices: &DeviceState, bindings: KeyBindings) -> Result<Self> {
        if devices.keyboard.is_none() {
            return Err(SkirmishError::MissingDependency(
                "keyboard input is not available".to_string(),
            ));
        }
        Ok(Self { bindings })
    }
}

impl System for KeyboardSystem {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        let keyboard = ctx.devices.keyboard.as_ref().ok_or_else(|| {
            SkirmishError::MissingDependency("keyboard input is not available".to_string())
        })?;

        for &id in entities {
            let mut input = ctx.world.get_mut::<Input>(id)?;
            input.clear();
            for key in Key::ALL {
                if self.bindings.is_pressed(key, keyboard) {
                    input.add(key);
                }
            }
        }
        Ok(())
    }
}

/// Maps the connected gamepad onto `Input` and the stick components
pub struct GamepadSystem {
    /// Left-stick magnitude that counts as a directional press
    pub button_threshold: f32,
}

impl Default for GamepadSystem {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl GamepadSystem {
    pub fn new(button_threshold: f32) -> Self {
        Self { button_threshold }
    }
}

impl System for GamepadSystem {
    fn name(&self) -> &'static str {
        "gamepad"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        let Some(pad) = ctx.devices.gamepad.as_ref() else {
            return Ok(());
        };

        let left_x = pad.axis(GamepadAxis::LeftX);
        let left_y = pad.axis(GamepadAxis::LeftY);
        let right_x = pad.axis(GamepadAxis::RightX);
        let right_y = pad.axis(GamepadAxis::RightY);
        let threshold = self.button_threshold;

        let pressed = [
            (
                Key::Up,
                pad.is_pressed(GamepadButton::DPadUp) || left_y < -threshold,
            ),
            (
                Key::Down,
                pad.is_pressed(GamepadButton::DPadDown) || left_y > threshold,
            ),
            (
                Key::Left,
                pad.is_pressed(GamepadButton::DPadLeft) || left_x < -threshold,
            ),
            (
                Key::Right,
                pad.is_pressed(GamepadButton::DPadRight) || left_x > threshold,
            ),
            (Key::Attack, pad.is_pressed(GamepadButton::South)),
        ];

        for &id in entities {
            if ctx.world.has::<Input>(id) {
                let mut input = ctx.world.get_mut::<Input>(id)?;
                input.clear();
                for (key, down) in pressed {
                    if down {
                        input.add(key);
                    }
                }
            }

            if ctx.world.has::<LeftStick>(id) {
                let mut stick = ctx.world.get_mut::<LeftStick>(id)?;
                if stick.enabled {
                    stick.set_axes(left_x, left_y);
                }
            }

            if ctx.world.has::<RightStick>(id) {
                let mut stick = ctx.world.get_mut::<RightStick>(id)?;
                if stick.enabled {
                    stick.set_axes(right_x, right_y);
                }
            }
        }
        Ok(())
    }
}

/// Feeds buffered wheel deltas into `MouseWheel` accumulators
pub struct MouseWheelSystem;

impl System for MouseWheelSystem {
    fn name(&self) -> &'static str {
        "mouse_wheel"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        let deltas = ctx.devices.wheel_deltas();
        if deltas.is_empty() {
            return Ok(());
        }

        for &id in entities {
            if !ctx.world.has::<MouseWheel>(id) {
                continue;
            }
            let mut wheel = ctx.world.get_mut::<MouseWheel>(id)?;
            if !wheel.enabled {
                continue;
            }
            for &delta in deltas {
                wheel.add_delta(delta);
            }
        }
        Ok(())
    }
}

/// Feeds buffered pointer events into `MouseDrag`
pub struct PointerSystem;

impl PointerSystem {
    fn apply(drag: &mut MouseDrag, event: PointerEvent) {
        match event {
            PointerEvent::Down { world_x, world_y } => {
                drag.pointer_down = true;
                drag.last_world_x = world_x;
                drag.last_world_y = world_y;
            }
            PointerEvent::Move { world_x, world_y } => {
                drag.last_world_x = world_x;
                drag.last_world_y = world_y;
            }
            PointerEvent::Up | PointerEvent::UpOutside => {
                drag.pointer_down = false;
            }
        }
    }
}

impl System for PointerSystem {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        let events = ctx.devices.pointer_events();
        if events.is_empty() {
            return Ok(());
        }

        for &id in entities {
            if !ctx.world.has::<MouseDrag>(id) {
                continue;
            }
            let mut drag = ctx.world.get_mut::<MouseDrag>(id)?;
            if !drag.enabled {
                continue;
            }
            for &event in events {
                Self::apply(&mut drag, event);
            }
        }
        Ok(())
    }
}
