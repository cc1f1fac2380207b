//! Scripted simulation command

use super::config;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use skirmish_core::{EntityId, Rect};
use skirmish_game::components::{Camera, HitReceiver};
use skirmish_game::Game;
use skirmish_runtime::{
    DeviceState, EventKind, GamepadAxis, GamepadButton, GamepadState, KeyCode, PointerEvent,
};
use std::cell::Cell;
use std::rc::Rc;

pub struct SimulateArgs {
    pub scenario: String,
    pub config: Option<String>,
}

/// A scripted run: targets to place and frames to play
#[derive(Debug, Deserialize)]
struct Scenario {
    /// Frame length used when a frame does not set its own
    #[serde(default = "default_dt_ms")]
    dt_ms: f64,
    #[serde(default)]
    dummies: Vec<DummySpec>,
    #[serde(default)]
    frames: Vec<FrameSpec>,
}

fn default_dt_ms() -> f64 {
    16.0
}

#[derive(Debug, Deserialize)]
struct DummySpec {
    name: String,
    x: f32,
    y: f32,
    #[serde(default = "default_dummy_size")]
    width: f32,
    #[serde(default = "default_dummy_size")]
    height: f32,
}

fn default_dummy_size() -> f32 {
    16.0
}

/// Device state held for `repeat` consecutive ticks
#[derive(Debug, Deserialize)]
struct FrameSpec {
    #[serde(default = "default_repeat")]
    repeat: u32,
    dt_ms: Option<f64>,
    /// Physical keys held, by winit key code name
    #[serde(default)]
    keys: Vec<KeyCode>,
    gamepad: Option<GamepadSpec>,
    /// Delivered on the first tick of the frame only
    #[serde(default)]
    pointer: Vec<PointerEvent>,
    /// Delivered on the first tick of the frame only
    #[serde(default)]
    wheel: Vec<f32>,
    pause: Option<bool>,
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GamepadSpec {
    left_x: f32,
    left_y: f32,
    right_x: f32,
    right_y: f32,
    buttons: Vec<GamepadButton>,
}

impl GamepadSpec {
    fn to_state(&self) -> GamepadState {
        let mut pad = GamepadState::new();
        pad.set_axis(GamepadAxis::LeftX, self.left_x);
        pad.set_axis(GamepadAxis::LeftY, self.left_y);
        pad.set_axis(GamepadAxis::RightX, self.right_x);
        pad.set_axis(GamepadAxis::RightY, self.right_y);
        for button in &self.buttons {
            pad.press(*button);
        }
        pad
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let game_config = config::load(args.config.as_deref())?;

    let content = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("Failed to read scenario '{}'", args.scenario))?;
    let scenario: Scenario = toml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario '{}'", args.scenario))?;

    if scenario.frames.is_empty() {
        bail!("Scenario '{}' has no frames", args.scenario);
    }

    let mut devices = DeviceState::with_keyboard();
    let mut game = Game::new(game_config, &devices).context("Failed to start game")?;

    let mut dummies: Vec<(String, EntityId)> = Vec::new();
    for dummy in &scenario.dummies {
        let area = Rect::new(dummy.x, dummy.y, dummy.width, dummy.height);
        let id = game
            .spawn_dummy(&dummy.name, area)
            .with_context(|| format!("Failed to spawn dummy '{}'", dummy.name))?;
        dummies.push((dummy.name.clone(), id));
    }

    let hits = Rc::new(Cell::new(0u32));
    let counter = hits.clone();
    game.events_mut()
        .subscribe(EventKind::Hit, move |_| counter.set(counter.get() + 1));

    let mut ticks = 0u64;
    for (index, frame) in scenario.frames.iter().enumerate() {
        if let Some(paused) = frame.pause {
            game.set_paused(paused);
        }

        if let Some(keyboard) = devices.keyboard.as_mut() {
            keyboard.release_all();
            for code in &frame.keys {
                keyboard.process_key_down(*code);
            }
        }
        match &frame.gamepad {
            Some(spec) => devices.connect_gamepad(spec.to_state()),
            None => devices.disconnect_gamepad(),
        }

        let dt_ms = frame.dt_ms.unwrap_or(scenario.dt_ms);
        for repeat in 0..frame.repeat {
            if repeat == 0 {
                for event in &frame.pointer {
                    devices.push_pointer(*event);
                }
                for delta in &frame.wheel {
                    devices.push_wheel(*delta);
                }
            }

            game.tick(&devices, dt_ms)
                .with_context(|| format!("Tick failed in frame {}", index))?;
            devices.end_frame();
            ticks += 1;
        }
    }

    print_summary(&game, ticks, hits.get(), &dummies)
}

fn print_summary(
    game: &Game,
    ticks: u64,
    hits: u32,
    dummies: &[(String, EntityId)],
) -> Result<()> {
    let view = game.player_view()?;
    let camera = game.world().get::<Camera>(game.player())?;
    let viewport = game.viewport();

    println!("Simulated {} tick(s), {:.0} ms", ticks, game.clock().now());
    println!(
        "Player: position ({:.1}, {:.1}), facing {}, moving {}, attacking {}",
        view.position.x, view.position.y, view.facing, view.moving, view.attacking
    );
    println!(
        "Camera: zoom {:.2}, mode {:?}, scroll ({:.1}, {:.1}), following {}",
        camera.zoom(),
        camera.mode(),
        viewport.scroll_x,
        viewport.scroll_y,
        viewport.following().is_some()
    );
    println!("Hits landed: {}", hits);

    for (name, id) in dummies {
        let receiver = game.world().get::<HitReceiver>(*id)?;
        println!("  {}: {} hit(s) taken", name, receiver.hits_taken);
    }
    Ok(())
}
