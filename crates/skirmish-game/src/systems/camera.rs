//! Camera systems: drag, right-stick pan, wheel zoom and follow

use crate::components::{Camera, MouseDrag, MouseWheel, Physics, RightStick};
use crate::system::{System, TickContext};
use skirmish_core::{EntityId, Result, SkirmishError};
use skirmish_runtime::GamepadButton;
use std::collections::HashMap;

/// Pans the viewport while the pointer is held down
pub struct CameraDragSystem {
    pub multiplier: f32,
    pub smooth_factor: f32,
}

impl Default for CameraDragSystem {
    fn default() -> Self {
        Self::new(2.0, 0.2)
    }
}

impl CameraDragSystem {
    pub fn new(multiplier: f32, smooth_factor: f32) -> Self {
        Self {
            multiplier,
            smooth_factor,
        }
    }
}

impl System for CameraDragSystem {
    fn name(&self) -> &'static str {
        "camera_drag"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            let mut camera = ctx.world.get_mut::<Camera>(id)?;
            if !ctx.world.has::<MouseDrag>(id) {
                continue;
            }
            let drag = *ctx.world.get::<MouseDrag>(id)?;
            if !drag.enabled {
                continue;
            }

            let pointer = drag.pointer();
            match (drag.pointer_down, camera.dragging) {
                (true, false) => {
                    camera.set_fixed(false);
                    camera.start_drag(pointer.x, pointer.y);
                    log::debug!("camera drag started at ({}, {})", pointer.x, pointer.y);
                }
                (false, true) => {
                    camera.set_fixed(true);
                    camera.end_drag();
                    log::debug!("camera drag ended");
                }
                (true, true) => {
                    let scale = self.multiplier * self.smooth_factor / camera.zoom();
                    let delta = (pointer - camera.drag_start()) * scale;
                    ctx.viewport.scroll_by(-delta.x, -delta.y);
                    camera.start_drag(pointer.x, pointer.y);
                }
                (false, false) => {}
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PanCounters {
    x: u32,
    y: u32,
}

/// Pans the viewport with the right analog stick, in capped steps
pub struct CameraRightStickSystem {
    /// Pixels moved per tick while the stick is held
    pub pan_step: f32,
    /// Ticks of continuous movement allowed per axis before it stops
    pub pan_cap: u32,
    counters: HashMap<EntityId, PanCounters>,
}

impl Default for CameraRightStickSystem {
    fn default() -> Self {
        Self::new(8.0, 28)
    }
}

impl CameraRightStickSystem {
    pub fn new(pan_step: f32, pan_cap: u32) -> Self {
        Self {
            pan_step,
            pan_cap,
            counters: HashMap::new(),
        }
    }

    /// Scroll offset for one axis, advancing its counter
    fn pan_axis(&self, value: f32, counter: &mut u32) -> f32 {
        if value == 0.0 {
            *counter = 0;
            return 0.0;
        }
        let offset = if *counter < self.pan_cap {
            self.pan_step * value.signum()
        } else {
            0.0
        };
        *counter = counter.saturating_add(1);
        offset
    }
}

impl System for CameraRightStickSystem {
    fn name(&self) -> &'static str {
        "camera_right_stick"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        let Some(pad) = ctx.devices.gamepad.as_ref() else {
            return Ok(());
        };
        let stick_pressed = pad.is_pressed(GamepadButton::RightStick);

        for &id in entities {
            let mut camera = ctx.world.get_mut::<Camera>(id)?;
            if !ctx.world.has::<RightStick>(id) {
                continue;
            }
            let stick = *ctx.world.get::<RightStick>(id)?;
            if !stick.enabled {
                continue;
            }

            let mut counters = self.counters.get(&id).copied().unwrap_or_default();
            let dx = self.pan_axis(stick.x_axis, &mut counters.x);
            let dy = self.pan_axis(stick.y_axis, &mut counters.y);
            self.counters.insert(id, counters);

            if dx != 0.0 || dy != 0.0 {
                ctx.viewport.scroll_by(dx, dy);
            }

            // Pressing the stick counts as panning even when it is centered
            let idle = stick.is_idle() && !stick_pressed;
            if !camera.dragging {
                camera.set_fixed(idle);
            }
        }
        Ok(())
    }
}

/// Applies accumulated wheel input as stepped zoom
pub struct CameraZoomSystem {
    pub step: f32,
}

impl Default for CameraZoomSystem {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl CameraZoomSystem {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl System for CameraZoomSystem {
    fn name(&self) -> &'static str {
        "camera_zoom"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            let mut camera = ctx.world.get_mut::<Camera>(id)?;
            if !ctx.world.has::<MouseWheel>(id) {
                continue;
            }
            let mut wheel = ctx.world.get_mut::<MouseWheel>(id)?;
            if !wheel.enabled {
                continue;
            }

            let delta = wheel.consume_delta();
            if delta == 0.0 {
                continue;
            }
            // Scrolling down (positive delta) zooms out
            let zoom = camera.zoom() - self.step * delta.signum();
            camera.set_zoom(zoom);
            ctx.viewport.set_zoom(camera.zoom());
            log::trace!("camera zoom {}", camera.zoom());
        }
        Ok(())
    }
}

/// Keeps the viewport on the camera target while the camera is fixed
pub struct CameraSystem;

impl System for CameraSystem {
    fn name(&self) -> &'static str {
        "camera_follow"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, entities: &[EntityId]) -> Result<()> {
        for &id in entities {
            let camera = ctx.world.get::<Camera>(id)?;
            let target = camera
                .target
                .filter(|target| ctx.world.contains(*target))
                .ok_or_else(|| SkirmishError::missing_component(ctx.world.label(id), "camera target"))?;

            if camera.fixed && !camera.dragging {
                let body = ctx.world.get::<Physics>(target)?.body;
                let center = ctx.physics.body(body)?.center();
                ctx.viewport.follow(target, center);
            } else {
                ctx.viewport.stop_follow();
            }
        }
        Ok(())
    }
}
