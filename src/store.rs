//! In-memory holder for the latest temperature reading.
//!
//! The value is kept as raw `f64` bits in an [`AtomicU64`], so reads and
//! writes are single atomic operations: a reader sees either the old value or
//! the new one, never a mix. All accesses use `SeqCst`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle to the most recent sensor reading.
///
/// Cloning is cheap and every clone refers to the same cell. The ingestion
/// task writes through one clone, HTTP handlers read through others.
#[derive(Debug, Clone, Default)]
pub struct TemperatureStore {
    bits: Arc<AtomicU64>,
}

impl TemperatureStore {
    /// Create a store holding `0.0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(0.0_f64.to_bits())),
        }
    }

    /// Overwrite the stored reading.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::SeqCst);
    }

    /// Current reading, or `0.0` if nothing has been set yet.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_is_zero() {
        let store = TemperatureStore::new();
        assert_eq!(store.get().to_bits(), 0.0_f64.to_bits());
        assert_eq!(TemperatureStore::default().get().to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn test_set_get_exact() {
        let store = TemperatureStore::new();
        for v in [
            25.5,
            -3.2,
            0.1 + 0.2,
            -0.0,
            f64::MIN_POSITIVE,
            f64::MAX,
            f64::INFINITY,
        ] {
            store.set(v);
            assert_eq!(store.get().to_bits(), v.to_bits(), "value {v}");
        }
    }

    #[test]
    fn test_nan_is_preserved() {
        let store = TemperatureStore::new();
        store.set(f64::NAN);
        assert!(store.get().is_nan());
    }

    #[test]
    fn test_clones_share_cell() {
        let writer = TemperatureStore::new();
        let reader = writer.clone();
        writer.set(21.75);
        assert!((reader.get() - 21.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_concurrent_reads_never_torn() {
        // Bit patterns that differ in both halves of the word.
        let a = f64::from_bits(0x0000_0000_FFFF_FFFF);
        let b = f64::from_bits(0x3FF0_0000_0000_0000);
        let store = TemperatureStore::new();
        store.set(a);

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..100_000 {
                    store.set(if i % 2 == 0 { b } else { a });
                }
            })
        };

        for _ in 0..100_000 {
            let bits = store.get().to_bits();
            assert!(bits == a.to_bits() || bits == b.to_bits(), "torn read {bits:#x}");
        }
        writer.join().unwrap();
    }
}
