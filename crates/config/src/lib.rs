pub mod schema;
pub mod watcher;

pub use schema::{DisplayConfig, StatsConfig, ThemeConfig};
pub use watcher::ConfigWatcher;

use fuel_core::{FuelError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `StatsConfig::default()` if
/// the file doesn't exist so the pages always have sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<StatsConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(StatsConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| FuelError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: StatsConfig =
        toml::from_str(&raw).map_err(|e| FuelError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("fuelstats").join("fuelstats.toml")
}
