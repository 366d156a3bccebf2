//! Single-target state estimator with occlusion recovery.

use std::time::Instant;

use ndarray::Array2;
use tracing::{debug, info, warn};

use crate::tracker::config::{ConfigError, EstimatorConfig, NoiseGain};
use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::measurement::{Measurement, Prediction};
use crate::tracker::motion_state::MotionState;
use crate::tracker::track::Track;
use crate::tracker::track_state::TrackState;

/// Recursive estimator for one target.
///
/// Call [`update`](Self::update) once per cycle with the latest measurement,
/// if any, and the current monotonic time. While tracking, each cycle yields
/// the predicted `[x, y, r]` of the target.
#[derive(Debug, Clone)]
pub struct StateEstimator {
    config: EstimatorConfig,
    kalman_filter: KalmanFilter,
    state: TrackState,
    previous_tick: Option<Instant>,
    last_dt: f64,
}

impl Default for StateEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl StateEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            kalman_filter: KalmanFilter::new(),
            state: TrackState::Idle,
            previous_tick: None,
            last_dt: 0.0,
        }
    }

    /// Like [`new`](Self::new), rejecting an invalid configuration.
    pub fn try_new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Run one predict/correct cycle.
    ///
    /// Returns the prediction for this cycle, or `None` while idle.
    pub fn update(&mut self, measurement: Option<Measurement>, now: Instant) -> Option<Prediction> {
        let dt = self.elapsed(now);

        self.kalman_filter.set_noise(
            self.config.process_noise_gain.variance(),
            self.config.measurement_noise_gain.variance(),
        );

        let prediction = match &mut self.state {
            TrackState::Tracking(track) => {
                let prediction = track.predict(&self.kalman_filter, dt);
                let state = track.motion_state();
                debug!(dt, speed = state.speed(), ?state, "predicted");
                Some(prediction)
            }
            TrackState::Idle => None,
        };

        match measurement {
            Some(measurement) => self.handle_measurement(measurement),
            None => self.handle_missing(),
        }

        self.previous_tick = Some(now);
        prediction
    }

    fn elapsed(&mut self, now: Instant) -> f64 {
        let dt = match self.previous_tick {
            Some(previous) => {
                if now < previous {
                    warn!("clock went backwards, clamping dT to zero");
                }
                now.saturating_duration_since(previous).as_secs_f64()
            }
            None => 0.0,
        };
        self.last_dt = dt;
        dt
    }

    fn handle_missing(&mut self) {
        let TrackState::Tracking(track) = &mut self.state else {
            return;
        };

        let lost = track.mark_missed();
        if lost >= self.config.lost_threshold {
            info!(lost, "no measurement for too long, dropping track");
            self.state = TrackState::Idle;
        } else {
            debug!(lost, "no measurement, coasting");
            track.coast();
        }
    }

    fn handle_measurement(&mut self, measurement: Measurement) {
        debug!(?measurement, "measurement");

        if let TrackState::Tracking(track) = &mut self.state {
            match track.update(&self.kalman_filter, &measurement) {
                Ok(()) => return,
                Err(err) => warn!(%err, "correction failed, re-acquiring from measurement"),
            }
        }

        info!(x = measurement.x, y = measurement.y, r = measurement.r, "target acquired");
        self.state = TrackState::Tracking(Track::activate(&self.kalman_filter, &measurement));
    }

    /// Drop the track and forget the previous tick.
    pub fn reset(&mut self) {
        self.state = TrackState::Idle;
        self.previous_tick = None;
        self.last_dt = 0.0;
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Takes effect from the next cycle.
    pub fn set_process_noise_gain(&mut self, gain: NoiseGain) {
        self.config.process_noise_gain = gain;
    }

    /// Takes effect from the next cycle.
    pub fn set_measurement_noise_gain(&mut self, gain: NoiseGain) {
        self.config.measurement_noise_gain = gain;
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// Consecutive empty cycles of the current track, 0 while idle.
    pub fn lost_count(&self) -> u32 {
        self.state.track().map_or(0, Track::lost)
    }

    pub fn motion_state(&self) -> Option<MotionState> {
        self.state.track().map(Track::motion_state)
    }

    pub fn covariance(&self) -> Option<&Array2<f64>> {
        self.state.track().map(Track::covariance)
    }

    pub fn process_noise(&self) -> &Array2<f64> {
        self.kalman_filter.process_noise()
    }

    pub fn measurement_noise(&self) -> &Array2<f64> {
        self.kalman_filter.measurement_noise()
    }

    /// Transition matrix built from the most recent `dT`.
    ///
    /// Only applied when that cycle started in the tracking state.
    pub fn transition(&self) -> Array2<f64> {
        KalmanFilter::transition(self.last_dt)
    }

    /// Elapsed seconds seen by the most recent cycle.
    pub fn last_dt(&self) -> f64 {
        self.last_dt
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use approx::assert_relative_eq;

    fn at(start: Instant, secs: f64) -> Instant {
        start + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_idle_until_first_measurement() {
        let mut estimator = StateEstimator::default();
        let t0 = Instant::now();

        assert_eq!(estimator.update(None, t0), None);
        assert!(!estimator.is_tracking());
        assert_eq!(estimator.lost_count(), 0);

        // First detection initializes but does not predict.
        let out = estimator.update(Some(Measurement::new(3.0, 4.0, 5.0)), at(t0, 1.0));
        assert_eq!(out, None);
        assert!(estimator.is_tracking());
        assert_eq!(
            estimator.motion_state().unwrap().to_array(),
            [3.0, 4.0, 0.0, 0.0, 5.0]
        );
    }

    #[test]
    fn test_noise_recomputed_from_gains() {
        let mut estimator = StateEstimator::default();
        let t0 = Instant::now();

        assert_relative_eq!(estimator.process_noise()[[0, 0]], 1e-2);
        assert_relative_eq!(estimator.measurement_noise()[[0, 0]], 1e-1);

        estimator.update(None, t0);
        let q = estimator.process_noise().clone();
        let r = estimator.measurement_noise().clone();
        assert_relative_eq!(q[[3, 3]], 0.1, epsilon = 1e-12);
        assert_relative_eq!(r[[2, 2]], 0.01, epsilon = 1e-12);
        assert_eq!(q[[0, 1]], 0.0);

        estimator.update(Some(Measurement::new(0.0, 0.0, 1.0)), at(t0, 1.0));
        estimator.update(None, at(t0, 2.0));
        assert_eq!(estimator.process_noise(), &q);
        assert_eq!(estimator.measurement_noise(), &r);

        estimator.set_process_noise_gain(NoiseGain::new(1000).unwrap());
        estimator.set_measurement_noise_gain(NoiseGain::new(1).unwrap());
        estimator.update(None, at(t0, 3.0));
        assert_relative_eq!(estimator.process_noise()[[4, 4]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(estimator.measurement_noise()[[1, 1]], 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_transition_follows_dt() {
        let mut estimator = StateEstimator::default();
        let t0 = Instant::now();
        estimator.update(Some(Measurement::new(0.0, 0.0, 1.0)), t0);
        estimator.update(None, at(t0, 0.25));

        assert_relative_eq!(estimator.last_dt(), 0.25, epsilon = 1e-9);
        let a = estimator.transition();
        assert_relative_eq!(a[[0, 2]], 0.25, epsilon = 1e-9);
        assert_relative_eq!(a[[1, 3]], 0.25, epsilon = 1e-9);
        assert_eq!(a[[2, 2]], 1.0);
    }

    #[test]
    fn test_clock_regression_clamped() {
        let mut estimator = StateEstimator::default();
        let t0 = Instant::now() + Duration::from_secs(10);
        estimator.update(Some(Measurement::new(1.0, 1.0, 1.0)), t0);

        let out = estimator.update(None, t0 - Duration::from_secs(5));
        assert_eq!(estimator.last_dt(), 0.0);
        assert_eq!(out, Some(Prediction { x: 1.0, y: 1.0, r: 1.0 }));
    }

    #[test]
    fn test_coasting_keeps_prediction_as_posterior() {
        let mut estimator = StateEstimator::default();
        let t0 = Instant::now();
        estimator.update(Some(Measurement::new(0.0, 0.0, 5.0)), t0);
        estimator.update(Some(Measurement::new(1.0, 0.0, 5.0)), at(t0, 1.0));
        let covariance = estimator.covariance().unwrap().clone();

        let prediction = estimator.update(None, at(t0, 2.0)).unwrap();
        let state = estimator.motion_state().unwrap();
        assert_eq!(state.prediction(), prediction);
        assert_eq!(estimator.covariance().unwrap(), &covariance);
        assert_eq!(estimator.lost_count(), 1);
    }

    #[test]
    fn test_track_dropped_at_threshold() {
        let config = EstimatorConfig::default().with_lost_threshold(3).unwrap();
        let mut estimator = StateEstimator::try_new(config).unwrap();
        let t0 = Instant::now();
        estimator.update(Some(Measurement::new(0.0, 0.0, 1.0)), t0);

        for i in 1..3 {
            assert!(estimator.update(None, at(t0, i as f64)).is_some());
            assert!(estimator.is_tracking());
        }
        // The dropping cycle still predicts.
        assert!(estimator.update(None, at(t0, 3.0)).is_some());
        assert!(!estimator.is_tracking());
        assert_eq!(estimator.update(None, at(t0, 4.0)), None);
    }

    #[test]
    fn test_singular_correction_reacquires() {
        let mut estimator = StateEstimator::default();
        let stale = Track::activate(&estimator.kalman_filter, &Measurement::new(1.0, 1.0, 1.0))
            .with_covariance(Array2::zeros((5, 5)));
        estimator.state = TrackState::Tracking(stale);
        estimator.kalman_filter.set_noise(0.0, 0.0);

        estimator.handle_measurement(Measurement::new(8.0, 9.0, 2.0));

        assert!(estimator.is_tracking());
        assert_eq!(
            estimator.motion_state().unwrap().to_array(),
            [8.0, 9.0, 0.0, 0.0, 2.0]
        );
        assert_eq!(estimator.covariance().unwrap(), &Array2::<f64>::eye(5));
        assert_eq!(estimator.lost_count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut estimator = StateEstimator::default();
        estimator.update(Some(Measurement::new(0.0, 0.0, 1.0)), Instant::now());
        estimator.reset();
        assert_eq!(estimator.state(), &TrackState::Idle);
        assert_eq!(estimator.motion_state(), None);
    }

    #[test]
    fn test_try_new_rejects_zero_threshold() {
        let config = EstimatorConfig {
            lost_threshold: 0,
            ..EstimatorConfig::default()
        };
        assert_eq!(
            StateEstimator::try_new(config).unwrap_err(),
            ConfigError::ZeroLostThreshold
        );
    }
}
