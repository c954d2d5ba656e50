//! Current temperature endpoint.

use axum::{extract::State, Json};

use crate::AppState;

/// `GET /api/temp` — latest sensor reading as a bare JSON number.
///
/// Always succeeds. Returns `0.0` until the first reading arrives, which is
/// indistinguishable from a genuine `0.0`.
pub async fn current_temp(State(state): State<AppState>) -> Json<f64> {
    Json(state.store.get())
}
