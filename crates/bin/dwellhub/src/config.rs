//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `dwellhub.toml` in the working directory, or the file named by
//! `DWELLHUB_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use dwellhub_domain::device::{Attributes, DeviceVariant};
use dwellhub_domain::dwelling::DwellingState;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_PATH: &str = "dwellhub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Identifier generation.
    pub ids: IdsConfig,
    /// Devices, hubs and dwellings created at startup.
    pub inventory: Inventory,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// How the store names new aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

/// Identifier generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IdsConfig {
    pub strategy: IdStrategy,
    /// Prefix for sequential ids (`{prefix}-1`, `{prefix}-2`, …).
    pub prefix: String,
}

/// Startup inventory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Inventory {
    /// Devices not paired to any hub.
    pub devices: Vec<DeviceSeed>,
    /// Hubs not installed in any dwelling.
    pub hubs: Vec<HubSeed>,
    pub dwellings: Vec<DwellingSeed>,
}

/// One device: its variant plus variant attributes.
#[derive(Debug, Deserialize)]
pub struct DeviceSeed {
    pub kind: DeviceVariant,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HubSeed {
    pub devices: Vec<DeviceSeed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DwellingSeed {
    pub state: DwellingState,
    pub hubs: Vec<HubSeed>,
}

impl Config {
    /// Load configuration from `dwellhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("DWELLHUB_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("DWELLHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("DWELLHUB_ID_STRATEGY") {
            self.ids.strategy = parse_strategy(&val)?;
        }
        if let Ok(val) = std::env::var("DWELLHUB_ID_PREFIX") {
            self.ids.prefix = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Err(err) = EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Validation(format!(
                "invalid log filter `{}`: {err}",
                self.logging.filter
            )));
        }
        if self.ids.strategy == IdStrategy::Sequential && self.ids.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "sequential ids need a non-empty prefix".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_strategy(value: &str) -> Result<IdStrategy, ConfigError> {
    match value {
        "uuid" => Ok(IdStrategy::Uuid),
        "sequential" => Ok(IdStrategy::Sequential),
        other => Err(ConfigError::Validation(format!(
            "unknown id strategy `{other}`"
        ))),
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dwellhub=info".to_string(),
        }
    }
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            strategy: IdStrategy::default(),
            prefix: "uuid".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.filter, "dwellhub=info");
        assert_eq!(config.ids.strategy, IdStrategy::Uuid);
        assert_eq!(config.ids.prefix, "uuid");
        assert!(config.inventory.dwellings.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ids.strategy, IdStrategy::Uuid);
    }

    #[test]
    fn should_parse_nested_inventory() {
        let toml = "
            [ids]
            strategy = 'sequential'
            prefix = 'dev'

            [[inventory.dwellings]]
            state = 'occupied'

            [[inventory.dwellings.hubs]]

            [[inventory.dwellings.hubs.devices]]
            kind = 'lock'
            state = 'locked'
            code = ['1', '2', '3']

            [[inventory.devices]]
            kind = 'dimmer'
            brightness = 40
        ";
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.ids.strategy, IdStrategy::Sequential);
        assert_eq!(config.ids.prefix, "dev");
        let dwelling = &config.inventory.dwellings[0];
        assert_eq!(dwelling.state, DwellingState::Occupied);
        let lock = &dwelling.hubs[0].devices[0];
        assert_eq!(lock.kind, DeviceVariant::Lock);
        assert_eq!(lock.attributes["state"], "locked");
        assert_eq!(lock.attributes["code"], serde_json::json!(["1", "2", "3"]));
        let dimmer = &config.inventory.devices[0];
        assert_eq!(dimmer.kind, DeviceVariant::Dimmer);
        assert_eq!(dimmer.attributes["brightness"], 40);
        assert!(!dimmer.attributes.contains_key("kind"));
    }

    #[test]
    fn should_parse_example_file() {
        let config: Config = toml::from_str(include_str!("../dwellhub.example.toml")).unwrap();
        assert_eq!(config.inventory.dwellings.len(), 1);
        assert_eq!(config.inventory.hubs.len(), 1);
        assert_eq!(config.inventory.devices.len(), 1);
    }

    #[test]
    fn should_reject_unknown_device_kind() {
        let result: Result<Config, _> = toml::from_str("[[inventory.devices]]\nkind = 'toaster'");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.ids.prefix, "uuid");
    }

    #[test]
    fn should_reject_empty_prefix_for_sequential_ids() {
        let mut config = Config::default();
        config.ids.strategy = IdStrategy::Sequential;
        config.ids.prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_invalid_log_filter() {
        let mut config = Config::default();
        config.logging.filter = "dwellhub=loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("dwellhub=loud")
        ));
    }

    #[test]
    fn should_accept_default_log_filter() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_parse_strategy_names() {
        assert_eq!(parse_strategy("uuid").unwrap(), IdStrategy::Uuid);
        assert_eq!(parse_strategy("sequential").unwrap(), IdStrategy::Sequential);
        assert!(parse_strategy("random").is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
