//! CLI error types with miette diagnostics.
//!
//! Maps config, fixture and scrape failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use ltexporter_config::ConfigError;
use ltexporter_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const SCRAPE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(ltexporter::config),
        help("Check the config file, or print the path in use with: ltexporter config path")
    )]
    Config(#[from] ConfigError),

    #[error("No devices to scrape")]
    #[diagnostic(
        code(ltexporter::no_devices),
        help(
            "Add [[devices]] entries to {path}\n\
             or scrape one device with: ltexporter scrape --replay FILE --name NAME --address ADDR"
        )
    )]
    NoDevices { path: String },

    #[error("Device '{name}' is not configured")]
    #[diagnostic(
        code(ltexporter::device_not_found),
        help("Configured devices: {available}")
    )]
    DeviceNotFound { name: String, available: String },

    // ── Replay fixture ───────────────────────────────────────────────
    #[error("Could not load replay fixture")]
    #[diagnostic(
        code(ltexporter::fixture),
        help("The fixture is a JSON list of {{ path, match, reply | trap }} entries.")
    )]
    Fixture {
        #[source]
        source: ltexporter_api::Error,
    },

    // ── Scrape ───────────────────────────────────────────────────────
    #[error("{failed} of {total} device scrapes failed")]
    #[diagnostic(code(ltexporter::scrape_failed), help("{details}"))]
    ScrapeFailed {
        failed: usize,
        total: usize,
        details: String,
    },

    // ── Rendering ────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ltexporter::exposition))]
    Exposition(#[from] CoreError),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(ltexporter::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(ltexporter::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            Self::Config(_) | Self::NoDevices { .. } => exit_code::CONFIG,
            Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::ScrapeFailed { .. } => exit_code::SCRAPE,
            _ => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_failure_has_its_own_exit_code() {
        let err = CliError::ScrapeFailed {
            failed: 1,
            total: 2,
            details: String::new(),
        };
        assert_eq!(err.exit_code(), exit_code::SCRAPE);
        assert_eq!(err.to_string(), "1 of 2 device scrapes failed");
    }

    #[test]
    fn invalid_config_is_a_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "log.format".into(),
            reason: "bad".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
