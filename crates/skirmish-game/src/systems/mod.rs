//! Per-tick systems, grouped by concern

mod camera;
mod combat;
mod input;
mod movement;

pub use camera::{CameraDragSystem, CameraRightStickSystem, CameraSystem, CameraZoomSystem};
pub use combat::{AttackSystem, FacingSystem, HitHandler, HitboxSystem};
pub use input::{GamepadSystem, KeyboardSystem, MouseWheelSystem, PointerSystem};
pub use movement::{MovementSystem, PhysicsSystem};
