//! Error types.

use thiserror::Error;

pub use crate::sensor::parse::ParseError;

/// Failure to load the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Terminal errors of the sensor ingestion listener.
#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("failed to bind sensor socket {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept sensor connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("sensor connection read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("sensor line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("malformed sensor reading: {0}")]
    Parse(#[from] ParseError),
}
