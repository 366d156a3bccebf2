//! Filter state of an acquired target.

use ndarray::{Array1, Array2};

use crate::tracker::kalman_filter::{FilterError, KalmanFilter};
use crate::tracker::measurement::{Measurement, Prediction};
use crate::tracker::motion_state::MotionState;

/// Mean, covariance and loss bookkeeping of a live track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Kalman filter state mean (5-dim)
    mean: Array1<f64>,
    /// Kalman filter state covariance (5x5)
    covariance: Array2<f64>,
    /// Covariance held before the most recent predict
    prior_covariance: Array2<f64>,
    /// Consecutive cycles without a measurement
    lost: u32,
}

impl Track {
    /// Hard (re-)acquisition from a single measurement.
    pub fn activate(kalman_filter: &KalmanFilter, measurement: &Measurement) -> Self {
        let (mean, covariance) = kalman_filter.initiate(measurement);
        Self {
            mean,
            prior_covariance: covariance.clone(),
            covariance,
            lost: 0,
        }
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    pub fn lost(&self) -> u32 {
        self.lost
    }

    pub fn motion_state(&self) -> MotionState {
        MotionState::from_mean(&self.mean)
    }

    pub fn predict(&mut self, kalman_filter: &KalmanFilter, dt: f64) -> Prediction {
        let (new_mean, new_cov) = kalman_filter.predict(&self.mean, &self.covariance, dt);
        self.mean = new_mean;
        self.prior_covariance = std::mem::replace(&mut self.covariance, new_cov);
        Prediction::from_mean(&self.mean)
    }

    /// Fuse a measurement into the predicted state.
    ///
    /// The track is left untouched when the correction fails.
    pub fn update(
        &mut self,
        kalman_filter: &KalmanFilter,
        measurement: &Measurement,
    ) -> Result<(), FilterError> {
        let (new_mean, new_cov) = kalman_filter.update(&self.mean, &self.covariance, measurement)?;
        self.mean = new_mean;
        self.covariance = new_cov;
        self.lost = 0;
        Ok(())
    }

    /// Count one more empty cycle and return the running total.
    pub fn mark_missed(&mut self) -> u32 {
        self.lost += 1;
        self.lost
    }

    #[cfg(test)]
    pub(crate) fn with_covariance(mut self, covariance: Array2<f64>) -> Self {
        self.covariance = covariance;
        self
    }

    /// Keep the predicted mean as posterior and roll the covariance back to
    /// its value before the last predict.
    pub fn coast(&mut self) {
        self.covariance.clone_from(&self.prior_covariance);
    }
}
