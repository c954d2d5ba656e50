//! Configuration loading and defaults.
//!
//! Configuration is resolved in order of precedence (highest wins):
//!
//! 1. **Environment variables** — `LABTEMP_LISTEN`, `LABTEMP_SENSOR_LISTEN`,
//!    `LABTEMP_LOG_LEVEL`
//! 2. **Config file** — path via `--config <path>`, or `labtemp.toml` in CWD
//! 3. **Compiled defaults** — see each field's default value below
//!
//! The TOML file mirrors the struct hierarchy:
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:8080"
//! cors = true
//!
//! [sensor]
//! listen = "0.0.0.0:8088"
//! on_parse_error = "skip"   # or "stop"
//! max_line_bytes = 65536
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "labtemp.toml";

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind (default `0.0.0.0:8080`).
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Apply a permissive CORS layer so a browser dashboard on another
    /// origin can poll the API (default true).
    #[serde(default = "default_cors")]
    pub cors: bool,
}

/// Sensor ingestion socket settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    /// Socket address the device connects to (default `0.0.0.0:8088`).
    #[serde(default = "default_sensor_listen")]
    pub listen: String,
    /// What to do with a `temp:` line whose value is not a number.
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
    /// Longest accepted line; a longer one closes the connection (default 64 KiB).
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

/// Reaction to a malformed `temp:` payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Log a warning and keep reading.
    #[default]
    Skip,
    /// Close the listener with an error.
    Stop,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter level (default `info`). Overridden by `RUST_LOG` env var.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_cors() -> bool {
    true
}
fn default_sensor_listen() -> String {
    "0.0.0.0:8088".to_string()
}
fn default_max_line_bytes() -> usize {
    64 * 1024
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors: default_cors(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            listen: default_sensor_listen(),
            on_parse_error: ParseErrorPolicy::default(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration with the precedence chain: env vars > file > defaults.
    ///
    /// If `path` is `Some`, that file must exist and parse. Otherwise
    /// `labtemp.toml` in the current directory is used when present, falling
    /// back to compiled defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(listen) = lookup("LABTEMP_LISTEN") {
            self.server.listen = listen;
        }
        if let Some(listen) = lookup("LABTEMP_SENSOR_LISTEN") {
            self.sensor.listen = listen;
        }
        if let Some(level) = lookup("LABTEMP_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert!(config.server.cors);
        assert_eq!(config.sensor.listen, "0.0.0.0:8088");
        assert_eq!(config.sensor.on_parse_error, ParseErrorPolicy::Skip);
        assert_eq!(config.sensor.max_line_bytes, 65536);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.sensor.listen, "0.0.0.0:8088");
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [sensor]
            listen = "127.0.0.1:9000"
            on_parse_error = "stop"
            max_line_bytes = 256

            [server]
            cors = false
            "#,
        )
        .unwrap();
        assert_eq!(config.sensor.listen, "127.0.0.1:9000");
        assert_eq!(config.sensor.on_parse_error, ParseErrorPolicy::Stop);
        assert_eq!(config.sensor.max_line_bytes, 256);
        assert!(!config.server.cors);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<Config, _> = toml::from_str("[sensor]\non_parse_error = \"retry\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "LABTEMP_LISTEN" => Some("127.0.0.1:1".to_string()),
            "LABTEMP_SENSOR_LISTEN" => Some("127.0.0.1:2".to_string()),
            _ => None,
        });
        assert_eq!(config.server.listen, "127.0.0.1:1");
        assert_eq!(config.sensor.listen, "127.0.0.1:2");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load(Some("/nonexistent/labtemp.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
