//! Events published by the simulation

use skirmish_core::EntityId;
use std::fmt;

/// A typed event carried by the [`EventBus`](crate::EventBus)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Status snapshot for the on-screen overlay
    HudStats { health: u32, score: u32 },
    /// The simulation was paused or resumed
    PauseChanged { paused: bool },
    /// An attacker's hitbox landed on a target
    Hit { attacker: EntityId, target: EntityId },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::HudStats { .. } => EventKind::HudStats,
            GameEvent::PauseChanged { .. } => EventKind::PauseChanged,
            GameEvent::Hit { .. } => EventKind::Hit,
        }
    }
}

/// The name an event is subscribed under
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum EventKind {
    HudStats,
    PauseChanged,
    Hit,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::HudStats => "hud:stats",
            EventKind::PauseChanged => "hud:pause",
            EventKind::Hit => "combat:hit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
