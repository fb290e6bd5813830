use anyhow::{Context, Result};
use serde::Deserialize;

/// Complete Vigil configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VigilConfig {
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Event bus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BusConfig {
    /// Broadcast capacity for entity-added events
    #[serde(default = "default_entity_added_capacity")]
    pub entity_added_capacity: usize,
    /// Broadcast capacity for state-changed events
    #[serde(default = "default_state_changed_capacity")]
    pub state_changed_capacity: usize,
}

fn default_entity_added_capacity() -> usize {
    100
}

fn default_state_changed_capacity() -> usize {
    1000
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            entity_added_capacity: default_entity_added_capacity(),
            state_changed_capacity: default_state_changed_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "vigil=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<VigilConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: VigilConfig =
        toml::from_str(&contents).context("Failed to parse config TOML")?;
    Ok(config)
}
