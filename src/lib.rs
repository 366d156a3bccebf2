//! Single-target Kalman tracker with occlusion recovery.
//!
//! The [`StateEstimator`] fuses noisy `[x, y, r]` measurements of one moving
//! object into a smoothed `[x, y, vx, vy, r]` state. It coasts on the motion
//! model through short measurement gaps and drops the track after a fixed
//! number of consecutive empty cycles.
//!
//! The [`integration`] module wires an estimator to a latest-value input slot,
//! a clock and an output sink.

pub mod integration;
pub mod tracker;

pub use integration::{
    Clock, IntoMeasurement, MeasurementBuilder, MeasurementSlot, MeasurementSource,
    MonotonicClock, PredictionSink, TrackerPipeline,
};
pub use tracker::{
    ConfigError, EstimatorConfig, Measurement, MeasurementError, MotionState, NoiseGain,
    Prediction, StateEstimator, TrackState,
};
