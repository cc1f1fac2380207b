//! Error types for Skirmish

use thiserror::Error;

/// The main error type for Skirmish operations
#[derive(Debug, Error)]
pub enum SkirmishError {
    /// An entity lacks a component a system requires. Never defaulted, never retried.
    #[error("Entity '{entity}' is missing required component '{component}'")]
    MissingComponent {
        entity: String,
        component: &'static str,
    },

    /// An environmental precondition (e.g. an input device) is unavailable.
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),

    #[error("Physics error: {0}")]
    Physics(String),
}

impl SkirmishError {
    /// Build a `MissingComponent` error for the given entity label
    pub fn missing_component(entity: impl Into<String>, component: &'static str) -> Self {
        SkirmishError::MissingComponent {
            entity: entity.into(),
            component,
        }
    }
}

/// Result type alias for Skirmish operations
pub type Result<T> = std::result::Result<T, SkirmishError>;

impl From<toml::de::Error> for SkirmishError {
    fn from(err: toml::de::Error) -> Self {
        SkirmishError::TomlParse(err.to_string())
    }
}

impl From<toml::ser::Error> for SkirmishError {
    fn from(err: toml::ser::Error) -> Self {
        SkirmishError::TomlSer(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_component_names_entity_and_component() {
        let err = SkirmishError::missing_component("player", "camera");
        let msg = err.to_string();
        assert!(msg.contains("player"));
        assert!(msg.contains("camera"));
    }

    #[test]
    fn toml_errors_convert() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("a = ");
        let err: SkirmishError = parsed.unwrap_err().into();
        assert!(matches!(err, SkirmishError::TomlParse(_)));
    }
}
