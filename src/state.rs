//! Shared application state passed to every handler via Axum's `State` extractor.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::sensor::SensorStatus;
use crate::store::TemperatureStore;

/// Shared application state for the labtemp server.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration loaded at startup.
    pub config: Arc<Config>,
    /// Monotonic instant when the server started (for uptime calculation).
    pub start_time: Instant,
    /// Latest temperature reading, written by the sensor listener.
    pub store: TemperatureStore,
    /// Sensor listener state and counters.
    pub sensor: Arc<SensorStatus>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, store: TemperatureStore, sensor: Arc<SensorStatus>) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
            store,
            sensor,
        }
    }
}
