//! Single-slot overwrite buffer between a detector and the estimator.

use std::sync::Arc;

use parking_lot::Mutex;

use super::IntoMeasurement;
use crate::tracker::Measurement;

/// Latest-value cell for measurements.
///
/// Publishing replaces any value not yet taken, so a reader only ever sees the
/// newest measurement. Clones share the same slot, which lets a detector
/// thread publish while the estimator loop takes.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSlot {
    inner: Arc<Mutex<Option<Measurement>>>,
}

impl MeasurementSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a measurement, discarding any pending one.
    pub fn publish(&self, measurement: impl IntoMeasurement) {
        *self.inner.lock() = Some(measurement.into_measurement());
    }

    /// Take the pending measurement, leaving the slot empty.
    pub fn take(&self) -> Option<Measurement> {
        self.inner.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let slot = MeasurementSlot::new();
        assert!(slot.is_empty());

        slot.publish(Measurement::new(1.0, 1.0, 1.0));
        slot.publish([2.0f64, 2.0, 2.0]);
        assert!(!slot.is_empty());
        assert_eq!(slot.take(), Some(Measurement::new(2.0, 2.0, 2.0)));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_shared_across_threads() {
        let slot = MeasurementSlot::new();
        let writer = slot.clone();
        std::thread::spawn(move || {
            for i in 0..10 {
                writer.publish((i as f64, 0.0f64, 1.0f64));
            }
        })
        .join()
        .unwrap();

        assert_eq!(slot.take(), Some(Measurement::new(9.0, 0.0, 1.0)));
    }
}
