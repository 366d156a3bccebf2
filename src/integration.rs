//! Integration module for driving the estimator from external detectors.
//!
//! This module provides the latest-value input slot, traits for measurement
//! sources, prediction sinks and clocks, and a pipeline that runs one
//! estimator cycle per tick.

mod builder;
mod clock;
mod pipeline;
mod slot;
mod source;

pub use builder::MeasurementBuilder;
pub use clock::{Clock, MonotonicClock};
pub use pipeline::TrackerPipeline;
pub use slot::MeasurementSlot;
pub use source::{IntoMeasurement, MeasurementSource, PredictionSink};
