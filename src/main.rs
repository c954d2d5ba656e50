#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # labtemp
//!
//! Lab temperature service.
//!
//! A sensor board connects to the sensor port (default 8088) and streams
//! `temp:<float>` lines. The latest value is served over HTTP (default port
//! 8080) for the lab dashboard.
//!
//! ## API surface
//!
//! | Method | Path          | Description                          |
//! |--------|---------------|--------------------------------------|
//! | GET    | `/api/temp`   | Latest reading as a bare JSON number |
//! | GET    | `/api/health` | Liveness check with sensor status    |
//!
//! ## Architecture
//!
//! ```text
//! main.rs          — entry point, startup, graceful shutdown
//! config.rs        — TOML + env-var configuration
//! store.rs         — TemperatureStore (atomic f64 cell)
//! sensor/
//!   listener.rs    — single-connection TCP listener state machine
//!   framing.rs     — line splitting on `\n`, `\r`, `\r\n` with a length cap
//!   parse.rs       — `temp:<float>` line grammar
//!   status.rs      — listener state and counters
//! routes/
//!   temp.rs        — GET /api/temp
//!   health.rs      — GET /api/health
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

use labtemp::sensor::{self, SensorListener, SensorStatus};
use labtemp::{routes, AppState, Config, TemperatureStore};

/// Lab temperature service: TCP sensor ingestion with an HTTP read API.
#[derive(Parser)]
#[command(name = "labtemp", version)]
struct Cli {
    /// Path to TOML config file.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("labtemp: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    run_server(config).await
}

async fn run_server(config: Config) -> ExitCode {
    info!("labtemp v{} starting", env!("CARGO_PKG_VERSION"));

    let store = TemperatureStore::new();
    let sensor_status = Arc::new(SensorStatus::new());

    // Ingestion is required: a sensor bind failure aborts startup.
    let sensor_listener =
        match SensorListener::bind(&config.sensor, store.clone(), sensor_status.clone()).await {
            Ok(l) => l,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        };
    info!(
        "Sensor listener on {} (parse errors: {:?})",
        sensor_listener.local_addr(),
        config.sensor.on_parse_error
    );

    let listener = match TcpListener::bind(&config.server.listen).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind HTTP socket {}: {e}", config.server.listen);
            return ExitCode::FAILURE;
        }
    };
    info!("HTTP listening on {}", config.server.listen);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sensor_task = sensor::spawn(sensor_listener, shutdown_rx);

    let state = AppState::new(config, store, sensor_status);
    let app = routes::router(state);

    info!("Server ready");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Shutting down...");
    let _ = shutdown_tx.send(true);
    let _ = sensor_task.await;

    match result {
        Ok(()) => {
            info!("Goodbye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received SIGINT"),
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                }
            }
            Err(e) => {
                warn!("Failed to register SIGTERM handler: {e}");
                ctrl_c.await.ok();
                info!("Received SIGINT");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received SIGINT");
    }
}
