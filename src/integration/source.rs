//! Traits for measurement inputs and prediction outputs.

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use super::MeasurementSlot;
use crate::tracker::{Measurement, Prediction};

/// Source of the latest measurement for a cycle.
///
/// Implement this trait to connect any detector to the estimator. A source
/// that has buffered several measurements must return only the newest one.
///
/// # Example
///
/// ```ignore
/// use kalman_tracker_rs::{Measurement, MeasurementSource};
///
/// struct MyDetector {
///     // Your detector here
/// }
///
/// impl MeasurementSource for MyDetector {
///     fn poll(&mut self) -> Option<Measurement> {
///         // Return the newest ball position, if any
///         None
///     }
/// }
/// ```
pub trait MeasurementSource {
    /// Take the newest pending measurement, if any.
    fn poll(&mut self) -> Option<Measurement>;
}

impl MeasurementSource for MeasurementSlot {
    fn poll(&mut self) -> Option<Measurement> {
        self.take()
    }
}

/// Drains the channel and keeps only the last value.
impl MeasurementSource for Receiver<Measurement> {
    fn poll(&mut self) -> Option<Measurement> {
        self.try_iter().last()
    }
}

/// Destination for per-cycle predictions.
pub trait PredictionSink {
    fn publish(&mut self, prediction: Prediction);
}

impl PredictionSink for Vec<Prediction> {
    fn publish(&mut self, prediction: Prediction) {
        self.push(prediction);
    }
}

impl PredictionSink for Sender<Prediction> {
    fn publish(&mut self, prediction: Prediction) {
        if self.send(prediction).is_err() {
            debug!("prediction receiver dropped");
        }
    }
}

/// Helper trait for converting detector-specific outputs to a `Measurement`.
///
/// Implement this for your detector's output format to enable easy conversion.
pub trait IntoMeasurement {
    fn into_measurement(self) -> Measurement;
}

impl IntoMeasurement for Measurement {
    fn into_measurement(self) -> Measurement {
        self
    }
}

impl IntoMeasurement for [f64; 3] {
    fn into_measurement(self) -> Measurement {
        Measurement::from(self)
    }
}

impl IntoMeasurement for (f64, f64, f64) {
    fn into_measurement(self) -> Measurement {
        Measurement::new(self.0, self.1, self.2)
    }
}
