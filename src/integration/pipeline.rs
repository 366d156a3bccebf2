//! TrackerPipeline for driving the estimator from a measurement source.

use crate::tracker::{EstimatorConfig, Prediction, StateEstimator};

use super::{Clock, MeasurementSource, MonotonicClock, PredictionSink};

/// Bundles a measurement source, a clock and a prediction sink with a
/// [`StateEstimator`].
///
/// Each [`tick`](Self::tick) reads the clock, takes the newest measurement
/// from the source, runs one estimator cycle and forwards the prediction to
/// the sink while tracking.
pub struct TrackerPipeline<S, K, C = MonotonicClock>
where
    S: MeasurementSource,
    K: PredictionSink,
    C: Clock,
{
    source: S,
    sink: K,
    clock: C,
    estimator: StateEstimator,
}

impl<S, K> TrackerPipeline<S, K>
where
    S: MeasurementSource,
    K: PredictionSink,
{
    /// Create a pipeline timed by the monotonic wall clock.
    pub fn new(source: S, sink: K, config: EstimatorConfig) -> Self {
        Self::with_clock(source, sink, MonotonicClock, config)
    }

    /// Create a pipeline with default estimator configuration.
    pub fn with_default_config(source: S, sink: K) -> Self {
        Self::new(source, sink, EstimatorConfig::default())
    }
}

impl<S, K, C> TrackerPipeline<S, K, C>
where
    S: MeasurementSource,
    K: PredictionSink,
    C: Clock,
{
    pub fn with_clock(source: S, sink: K, clock: C, config: EstimatorConfig) -> Self {
        Self {
            source,
            sink,
            clock,
            estimator: StateEstimator::new(config),
        }
    }

    /// Run one cycle and return the prediction, if any.
    pub fn tick(&mut self) -> Option<Prediction> {
        let now = self.clock.now();
        let measurement = self.source.poll();
        let prediction = self.estimator.update(measurement, now);
        if let Some(prediction) = prediction {
            self.sink.publish(prediction);
        }
        prediction
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn estimator(&self) -> &StateEstimator {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut StateEstimator {
        &mut self.estimator
    }

    pub fn into_parts(self) -> (S, K, StateEstimator) {
        (self.source, self.sink, self.estimator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::MeasurementSlot;
    use crate::tracker::Measurement;

    #[test]
    fn test_tracker_pipeline() {
        let slot = MeasurementSlot::new();
        let mut pipeline =
            TrackerPipeline::with_default_config(slot.clone(), Vec::<Prediction>::new());

        // Idle cycle emits nothing.
        assert_eq!(pipeline.tick(), None);

        slot.publish(Measurement::new(10.0, 20.0, 5.0));
        assert_eq!(pipeline.tick(), None);
        assert!(pipeline.estimator().is_tracking());
        assert!(slot.is_empty());

        let prediction = pipeline.tick().unwrap();
        assert_eq!(pipeline.sink().as_slice(), &[prediction]);
        assert_eq!(pipeline.estimator().lost_count(), 1);
    }
}
