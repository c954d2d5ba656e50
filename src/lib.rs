#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

//! labtemp library — the building blocks of the lab temperature service.
//!
//! - `store` — shared cell holding the latest reading
//! - `sensor` — single-device TCP ingestion listener and line parser
//! - `routes` — HTTP route handlers and router
//! - `config` — configuration loading
//! - `state` — shared handler state
//! - `error` — error types

pub mod config;
pub mod error;
pub mod routes;
pub mod sensor;
pub mod state;
pub mod store;

// Re-export key types at crate root for convenience.
pub use config::Config;
pub use error::{ConfigError, ListenerError};
pub use sensor::{SensorListener, SensorStatus};
pub use state::AppState;
pub use store::TemperatureStore;
