//! Skirmish ECS - Entity store with stable IDs and named entities
//!
//! This crate wraps hecs with stable entity identifiers, entity names used
//! in error messages, and the `Component` trait that ties every component
//! type to the name it is reported under.

mod component;
mod entity;
mod world;

pub use component::{Component, ComponentNames};
pub use entity::EntityInfo;
pub use world::World;

pub use hecs::{Ref, RefMut};
