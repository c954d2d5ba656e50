//! Health-check endpoint.

use std::sync::atomic::Ordering;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// `GET /api/health` — liveness check.
///
/// Returns status, uptime, version, the current reading, and the sensor
/// listener's state and counters.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let uptime = state.start_time.elapsed().as_secs();
    let sensor = &state.sensor;
    let peer = sensor.peer().await.map(|addr| addr.to_string());

    Json(json!({
        "status": "ok",
        "uptime_secs": uptime,
        "version": env!("CARGO_PKG_VERSION"),
        "temperature": state.store.get(),
        "sensor": {
            "listen": state.config.sensor.listen,
            "state": sensor.state(),
            "peer": peer,
            "lines_received": sensor.lines_received.load(Ordering::Relaxed),
            "readings_accepted": sensor.readings_accepted.load(Ordering::Relaxed),
            "lines_ignored": sensor.lines_ignored.load(Ordering::Relaxed),
            "parse_errors": sensor.parse_errors.load(Ordering::Relaxed),
        },
    }))
}
