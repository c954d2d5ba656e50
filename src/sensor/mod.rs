//! Sensor ingestion.
//!
//! The lab's sensor board connects over plain TCP and streams
//! newline-delimited `temp:<float>` lines. [`SensorListener`] accepts that one
//! connection and writes every parsed value into the shared
//! [`TemperatureStore`](crate::store::TemperatureStore).
//!
//! ```text
//! Idle ──bind──▶ Listening ──accept──▶ Reading ──EOF / error / shutdown──▶ Closed
//! ```
//!
//! Lines end at `\n`, `\r` or `\r\n` and are capped in length.
//!
//! It is deliberately single-device: after the first accept the listening
//! socket is dropped and later devices are refused.

pub mod framing;
pub mod listener;
pub mod parse;
pub mod status;

pub use listener::SensorListener;
pub use parse::{parse_line, ParseError};
pub use status::{ListenerState, SensorStatus};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Run the listener in the background. Returns a `JoinHandle` to await on
/// shutdown.
///
/// Terminal errors are logged here and never reach the HTTP side.
pub fn spawn(listener: SensorListener, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = listener.local_addr();
        match listener.run(shutdown).await {
            Ok(()) => info!("Sensor listener on {addr} closed"),
            Err(e) => error!("Sensor listener on {addr} stopped: {e}"),
        }
    })
}
