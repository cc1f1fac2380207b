//! Game configuration loaded from TOML

use serde::{Deserialize, Serialize};
use skirmish_core::{Result, SkirmishError};
use skirmish_runtime::KeyBindings;
use std::path::Path;

/// Top-level configuration; every field has a default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub input: InputConfig,
    pub camera: CameraConfig,
    pub hitbox: HitboxConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 400.0,
            body_width: 16.0,
            body_height: 16.0,
            spawn_x: 400.0,
            spawn_y: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Left-stick magnitude that counts as a directional press
    pub button_threshold: f32,
    pub left_stick_deadzone: f32,
    pub right_stick_deadzone: f32,
    pub bindings: KeyBindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            button_threshold: 0.5,
            left_stick_deadzone: 0.5,
            right_stick_deadzone: 0.3,
            bindings: KeyBindings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub drag_multiplier: f32,
    pub drag_smooth_factor: f32,
    pub pan_step: f32,
    pub pan_cap: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.1,
            drag_multiplier: 2.0,
            drag_smooth_factor: 0.2,
            pan_step: 8.0,
            pan_cap: 28,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    pub width: f32,
    pub height: f32,
    pub distance: f32,
    pub duration_ms: f64,
    pub debug: bool,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 12.0,
            distance: 16.0,
            duration_ms: 120.0,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 2048.0,
            height: 2048.0,
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SkirmishError::InvalidConfig(msg));

        if self.player.speed < 0.0 {
            return invalid(format!("player speed must be >= 0, got {}", self.player.speed));
        }
        if self.player.body_width <= 0.0 || self.player.body_height <= 0.0 {
            return invalid("player body size must be positive".to_string());
        }
        if self.camera.min_zoom <= 0.0 || self.camera.min_zoom > self.camera.max_zoom {
            return invalid(format!(
                "zoom range {}..{} is inverted or non-positive",
                self.camera.min_zoom, self.camera.max_zoom
            ));
        }
        if self.camera.viewport_width <= 0.0 || self.camera.viewport_height <= 0.0 {
            return invalid("viewport size must be positive".to_string());
        }
        for (name, value) in [
            ("left_stick_deadzone", self.input.left_stick_deadzone),
            ("right_stick_deadzone", self.input.right_stick_deadzone),
        ] {
            if !(0.0..1.0).contains(&value) {
                return invalid(format!("{name} must be in [0, 1), got {value}"));
            }
        }
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return invalid("world bounds must be positive".to_string());
        }
        Ok(())
    }
}
