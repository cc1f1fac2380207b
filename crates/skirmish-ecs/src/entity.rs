//! Entity information for debugging and reporting

use skirmish_core::EntityId;
use serde::{Deserialize, Serialize};

/// Information about an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInfo {
    /// The entity ID
    pub id: EntityId,
    /// Human-readable name
    pub name: String,
    /// Component names present on this entity
    pub components: Vec<String>,
}

impl EntityInfo {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<String>) -> Self {
        self.components = components;
        self
    }

    pub fn has(&self, component: &str) -> bool {
        self.components.iter().any(|c| c == component)
    }
}
