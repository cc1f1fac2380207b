//! Skirmish Core - Foundational types for the Skirmish simulation
//!
//! This crate provides the types that every other Skirmish crate depends on:
//! - `EntityId` - Stable entity identifiers
//! - `Vec2`, `Rect` - Planar spatial types
//! - `Key`, `Direction` - Abstract input keys and facing directions
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{Result, SkirmishError};
pub use id::EntityId;
pub use types::{Direction, Key, Rect, Vec2};
