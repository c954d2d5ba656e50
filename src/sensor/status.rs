//! Observable listener state and counters.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;

/// Lifecycle of the sensor listener.
///
/// Transitions only move forward: `Idle → Listening → Reading → Closed`.
/// `Closed` is terminal; a closed listener never re-binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ListenerState {
    Idle = 0,
    Listening = 1,
    Reading = 2,
    Closed = 3,
}

impl ListenerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Reading => "reading",
            Self::Closed => "closed",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Listening,
            2 => Self::Reading,
            3 => Self::Closed,
            _ => Self::Idle,
        }
    }
}

/// Listener statistics. Atomics on the per-line hot path, Mutex only for
/// the peer address (set once per connection).
pub struct SensorStatus {
    state: AtomicU8,
    pub lines_received: AtomicU64,
    pub readings_accepted: AtomicU64,
    pub lines_ignored: AtomicU64,
    pub parse_errors: AtomicU64,
    peer: Mutex<Option<SocketAddr>>,
}

impl SensorStatus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ListenerState::Idle as u8),
            lines_received: AtomicU64::new(0),
            readings_accepted: AtomicU64::new(0),
            lines_ignored: AtomicU64::new(0),
            parse_errors: AtomicU64::new(0),
            peer: Mutex::new(None),
        }
    }

    pub fn state(&self) -> ListenerState {
        ListenerState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub(crate) fn set_state(&self, state: ListenerState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Address of the connected (or last connected) device.
    pub async fn peer(&self) -> Option<SocketAddr> {
        *self.peer.lock().await
    }

    pub(crate) async fn set_peer(&self, addr: SocketAddr) {
        *self.peer.lock().await = Some(addr);
    }
}

impl Default for SensorStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_idle() {
        let status = SensorStatus::new();
        assert_eq!(status.state(), ListenerState::Idle);
        assert_eq!(status.lines_received.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_state_roundtrip() {
        let status = SensorStatus::new();
        for s in [
            ListenerState::Listening,
            ListenerState::Reading,
            ListenerState::Closed,
        ] {
            status.set_state(s);
            assert_eq!(status.state(), s);
        }
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ListenerState::Listening).unwrap(),
            serde_json::json!("listening")
        );
        assert_eq!(ListenerState::Closed.as_str(), "closed");
    }
}
