//! Single-connection TCP listener for the sensor device.
//!
//! The listener binds once, accepts exactly one device, then drops the
//! listening socket so any further connection attempt is refused. Lines are
//! read until the device hangs up, an I/O error occurs, a line exceeds the
//! length cap, or shutdown is signalled. There is no reconnect: a closed
//! listener stays closed.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::framing::LineFramer;
use super::parse::{parse_line, ParseError};
use super::status::{ListenerState, SensorStatus};
use crate::config::{ParseErrorPolicy, SensorConfig};
use crate::error::ListenerError;
use crate::store::TemperatureStore;

/// A bound sensor socket waiting for its one device.
pub struct SensorListener {
    listener: TcpListener,
    addr: SocketAddr,
    store: TemperatureStore,
    status: Arc<SensorStatus>,
    policy: ParseErrorPolicy,
    max_line_bytes: usize,
}

impl SensorListener {
    /// Bind the sensor socket (`Idle → Listening`).
    pub async fn bind(
        config: &SensorConfig,
        store: TemperatureStore,
        status: Arc<SensorStatus>,
    ) -> Result<Self, ListenerError> {
        let addr = config.listen.as_str();
        let bind_err = |source: std::io::Error| ListenerError::Bind {
            addr: addr.to_string(),
            source,
        };
        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local = listener.local_addr().map_err(bind_err)?;
        status.set_state(ListenerState::Listening);
        Ok(Self {
            listener,
            addr: local,
            store,
            status,
            policy: config.on_parse_error,
            max_line_bytes: config.max_line_bytes,
        })
    }

    /// Address the socket is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accept one device and ingest its lines until the stream ends.
    ///
    /// The status is `Closed` when this returns, whatever the outcome.
    /// Flipping `shutdown` to `true` ends the wait in either accept or read
    /// and returns `Ok(())`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), ListenerError> {
        let Self {
            listener,
            store,
            status,
            policy,
            max_line_bytes,
            ..
        } = self;
        let mut framer = LineFramer::new(max_line_bytes);
        let result = ingest(listener, &mut framer, &store, &status, policy, &mut shutdown).await;
        status.set_state(ListenerState::Closed);
        result
    }
}

async fn ingest(
    listener: TcpListener,
    framer: &mut LineFramer,
    store: &TemperatureStore,
    status: &SensorStatus,
    policy: ParseErrorPolicy,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<(), ListenerError> {
    let (mut stream, peer) = tokio::select! {
        accepted = listener.accept() => accepted.map_err(ListenerError::Accept)?,
        () = shutdown_requested(shutdown) => {
            info!("Sensor listener shutting down, no device connected");
            return Ok(());
        }
    };
    // One device only: stop accepting.
    drop(listener);

    info!("Sensor device connected: {peer}");
    status.set_peer(peer).await;
    status.set_state(ListenerState::Reading);

    let mut chunk = [0u8; 1024];
    loop {
        let n = tokio::select! {
            read = stream.read(&mut chunk) => read.map_err(ListenerError::Read)?,
            () = shutdown_requested(shutdown) => {
                info!("Sensor listener shutting down, dropping {peer}");
                return Ok(());
            }
        };
        if n == 0 {
            if let Some(last) = framer.finish() {
                handle_line(&String::from_utf8_lossy(&last), store, status, policy)?;
            }
            info!("Sensor device {peer} disconnected");
            return Ok(());
        }
        let mut lines = Vec::new();
        let framed = framer.push(&chunk[..n], &mut lines);
        for line in lines {
            handle_line(&String::from_utf8_lossy(&line), store, status, policy)?;
        }
        framed.map_err(|e| ListenerError::LineTooLong { limit: e.limit })?;
    }
}

fn handle_line(
    line: &str,
    store: &TemperatureStore,
    status: &SensorStatus,
    policy: ParseErrorPolicy,
) -> Result<(), ParseError> {
    status.lines_received.fetch_add(1, Ordering::Relaxed);
    debug!("Sensor line: {line}");

    match parse_line(line) {
        Ok(Some(value)) => {
            store.set(value);
            status.readings_accepted.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        Ok(None) => {
            status.lines_ignored.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        Err(e) => {
            status.parse_errors.fetch_add(1, Ordering::Relaxed);
            match policy {
                ParseErrorPolicy::Skip => {
                    warn!("Skipping malformed sensor line: {e}");
                    Ok(())
                }
                ParseErrorPolicy::Stop => Err(e),
            }
        }
    }
}

/// Resolves once `shutdown` is `true`. A dropped sender never resolves.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
