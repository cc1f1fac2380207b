//! Configuration printing command

use anyhow::{Context, Result};
use skirmish_game::GameConfig;
use std::path::Path;

/// Load the game configuration from `path`, or the defaults when absent
pub fn load(path: Option<&str>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Ok(GameConfig::default()),
    }
}

pub fn run(path: Option<&str>) -> Result<()> {
    let config = load(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
