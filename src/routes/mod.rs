//! HTTP route handlers.
//!
//! | Method | Path          | Description                         |
//! |--------|---------------|-------------------------------------|
//! | GET    | `/api/temp`   | Latest temperature as a bare number |
//! | GET    | `/api/health` | Liveness check with sensor status   |

pub mod health;
pub mod temp;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut app: Router<AppState> = Router::new()
        .route("/api/temp", get(temp::current_temp))
        .route("/api/health", get(health::health))
        .layer(TraceLayer::new_for_http());

    if state.config.server.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}
