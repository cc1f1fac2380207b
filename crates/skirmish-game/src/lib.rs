//! Skirmish Game - the top-down action simulation
//!
//! This crate wires the lower Skirmish crates into a playable simulation:
//! - `components` - the closed set of component kinds and their data
//! - `systems` - input aggregation, movement, camera and combat systems
//! - `Pipeline` - the fixed per-tick schedule
//! - `Game` - the facade a host ticks once per frame
//!
//! ```no_run
//! use skirmish_game::{Game, GameConfig};
//! use skirmish_runtime::DeviceState;
//!
//! let mut devices = DeviceState::with_keyboard();
//! let mut game = Game::new(GameConfig::default(), &devices)?;
//! game.tick(&devices, 16.0)?;
//! devices.end_frame();
//! # Ok::<(), skirmish_core::SkirmishError>(())
//! ```

pub mod components;
mod config;
pub mod factory;
mod game;
mod pipeline;
mod system;
pub mod systems;
mod viewport;

pub use config::{CameraConfig, GameConfig, HitboxConfig, InputConfig, PlayerConfig, WorldConfig};
pub use game::{Game, PlayerView};
pub use pipeline::Pipeline;
pub use system::{DeferredAction, EntityScope, System, TickContext};
pub use viewport::Viewport;
