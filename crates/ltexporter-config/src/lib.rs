//! Configuration for `ltexporter`.
//!
//! Serialized defaults, then an optional TOML file, then `LTEXPORTER_`
//! environment variables (`__` separates nesting, so
//! `LTEXPORTER_SCRAPE__TIMEOUT_SECS=5` sets `scrape.timeout_secs`).
//! Translates into core types: [`Device`]s and the enabled collector set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ltexporter_core::{Collector, Device, LteCollector};

pub const ENV_PREFIX: &str = "LTEXPORTER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Devices to scrape.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,

    /// Which collectors are enabled.
    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub scrape: ScrapeSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// One monitored device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Value of the `name` label.
    pub name: String,

    /// Value of the `address` label (host or IP).
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub lte: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { lte: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrapeSettings {
    /// Bound of the sample channel between the scraper and its consumer.
    #[serde(default = "default_sink_capacity")]
    pub sink_capacity: usize,

    /// Per-device scrape budget; 0 disables the limit.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            sink_capacity: default_sink_capacity(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScrapeSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    /// Default `tracing` filter when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LogSettings {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

fn default_true() -> bool {
    true
}
fn default_sink_capacity() -> usize {
    256
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "pretty".into()
}

impl Config {
    /// Check what serde cannot: unique device names, usable scrape settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, device) in self.devices.iter().enumerate() {
            if device.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("devices[{i}].name"),
                    "must not be empty",
                ));
            }
            if device.address.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("devices[{i}].address"),
                    "must not be empty",
                ));
            }
            if !seen.insert(device.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("devices[{i}].name"),
                    format!("duplicate device name '{}'", device.name),
                ));
            }
        }

        if self.scrape.sink_capacity == 0 {
            return Err(ConfigError::invalid(
                "scrape.sink_capacity",
                "must be greater than 0",
            ));
        }

        match self.log.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::invalid(
                "log.format",
                format!("expected 'pretty' or 'json', got '{other}'"),
            )),
        }
    }

    /// Configured devices as core identities, in file order.
    pub fn devices(&self) -> Vec<Device> {
        self.devices
            .iter()
            .map(|d| Device::new(d.name.clone(), d.address.clone()))
            .collect()
    }

    /// The enabled collectors, in a fixed order.
    pub fn collectors(&self) -> Vec<Arc<dyn Collector>> {
        let mut collectors: Vec<Arc<dyn Collector>> = Vec::new();
        if self.features.lte {
            collectors.push(Arc::new(LteCollector::new()));
        }
        collectors
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "ltexporter").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ltexporter");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the configuration.
///
/// An explicit `path` must exist; the default path is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(explicit) if !explicit.exists() => {
            return Err(ConfigError::NotFound {
                path: explicit.to_path_buf(),
            });
        }
        Some(explicit) => explicit.to_path_buf(),
        None => config_path(),
    };

    let config: Config = figment(&path).extract()?;
    config.validate()?;
    Ok(config)
}

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_enable_lte() {
        let config = Config::default();
        assert!(config.features.lte);
        assert_eq!(config.scrape.sink_capacity, 256);
        assert_eq!(config.scrape.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.collectors().len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_devices_from_toml() {
        let file = write_config(
            r#"
[[devices]]
name = "edge-1"
address = "10.0.0.1"

[[devices]]
name = "edge-2"
address = "10.0.0.2"

[scrape]
timeout_secs = 0
"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(
            config.devices(),
            vec![
                Device::new("edge-1", "10.0.0.1"),
                Device::new("edge-2", "10.0.0.2")
            ]
        );
        assert_eq!(config.scrape.timeout(), None);
        assert_eq!(config.scrape.sink_capacity, 256);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn duplicate_device_names_are_rejected() {
        let file = write_config(
            r#"
[[devices]]
name = "edge-1"
address = "10.0.0.1"

[[devices]]
name = "edge-1"
address = "10.0.0.2"
"#,
        );
        let err = load_config(Some(file.path())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid devices[1].name: duplicate device name 'edge-1'"
        );
    }

    #[test]
    fn zero_sink_capacity_is_rejected() {
        let mut config = Config::default();
        config.scrape.sink_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "scrape.sink_capacity"
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut config = Config::default();
        config.log.format = "xml".into();
        assert!(config.validate().is_err());
        config.log.format = "json".into();
        assert!(config.validate().is_ok());
        assert!(config.log.is_json());
    }

    #[test]
    fn disabled_lte_has_no_collectors() {
        let mut config = Config::default();
        config.features.lte = false;
        assert!(config.collectors().is_empty());
    }

    #[test]
    fn toml_output_reloads_identically() {
        let mut config = Config::default();
        config.devices.push(DeviceConfig {
            name: "edge-1".into(),
            address: "10.0.0.1".into(),
        });
        let file = write_config(&config.to_toml().unwrap());
        assert_eq!(load_config(Some(file.path())).unwrap(), config);
    }
}
