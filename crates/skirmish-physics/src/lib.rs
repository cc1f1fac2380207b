//! Skirmish Physics - arcade bodies for a top-down world
//!
//! Provides the physics host the simulation core talks to:
//! - `Body` - axis-aligned box with a settable velocity
//! - `PhysicsWorld` - owns bodies behind `BodyHandle`s and integrates them,
//!   clamping bodies that collide with the world bounds

mod body;
mod world;

pub use body::Body;
pub use world::{BodyHandle, PhysicsWorld};
