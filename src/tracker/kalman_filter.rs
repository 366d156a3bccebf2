//! Constant-velocity Kalman filter over position and size using ndarray and a nalgebra-based inverse.
//!
//! The state is `[x, y, vx, vy, r]` and the measurement is `[x, y, r]`.

use ndarray::{Array1, Array2, arr1};
use thiserror::Error;

use crate::tracker::measurement::Measurement;

pub const STATE_DIM: usize = 5;
pub const MEASUREMENT_DIM: usize = 3;

/// Process noise diagonal before the first cycle.
const INITIAL_PROCESS_NOISE: f64 = 1e-2;
/// Measurement noise diagonal before the first cycle.
const INITIAL_MEASUREMENT_NOISE: f64 = 1e-1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("innovation covariance is singular")]
    SingularInnovation,
}

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    update_mat: Array2<f64>,
    process_noise: Array2<f64>,
    measurement_noise: Array2<f64>,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl KalmanFilter {
    pub fn new() -> Self {
        // H selects x, y and r.
        let mut update_mat = Array2::zeros((MEASUREMENT_DIM, STATE_DIM));
        update_mat[[0, 0]] = 1.0;
        update_mat[[1, 1]] = 1.0;
        update_mat[[2, 4]] = 1.0;

        Self {
            update_mat,
            process_noise: Array2::from_diag_elem(STATE_DIM, INITIAL_PROCESS_NOISE),
            measurement_noise: Array2::from_diag_elem(MEASUREMENT_DIM, INITIAL_MEASUREMENT_NOISE),
        }
    }

    /// Transition matrix `A` for a step of `dt` seconds.
    ///
    /// Identity except for the two position/velocity coupling terms.
    pub fn transition(dt: f64) -> Array2<f64> {
        let mut motion_mat = Array2::eye(STATE_DIM);
        motion_mat[[0, 2]] = dt;
        motion_mat[[1, 3]] = dt;
        motion_mat
    }

    pub fn update_mat(&self) -> &Array2<f64> {
        &self.update_mat
    }

    pub fn process_noise(&self) -> &Array2<f64> {
        &self.process_noise
    }

    pub fn measurement_noise(&self) -> &Array2<f64> {
        &self.measurement_noise
    }

    /// Rebuild `Q` and `R` as scaled identities.
    pub fn set_noise(&mut self, process_variance: f64, measurement_variance: f64) {
        self.process_noise = Array2::from_diag_elem(STATE_DIM, process_variance);
        self.measurement_noise = Array2::from_diag_elem(MEASUREMENT_DIM, measurement_variance);
    }

    /// Fresh state from a measurement: zero velocity, unit covariance.
    pub fn initiate(&self, measurement: &Measurement) -> (Array1<f64>, Array2<f64>) {
        let mean = arr1(&[measurement.x, measurement.y, 0.0, 0.0, measurement.r]);
        let covariance = Array2::eye(STATE_DIM);
        (mean, covariance)
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        dt: f64,
    ) -> (Array1<f64>, Array2<f64>) {
        let motion_mat = Self::transition(dt);

        let new_mean = motion_mat.dot(mean);
        let new_covariance =
            motion_mat.dot(covariance).dot(&motion_mat.t()) + &self.process_noise;

        (new_mean, new_covariance)
    }

    pub fn project(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let mean_proj = self.update_mat.dot(mean);
        let covariance_proj =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + &self.measurement_noise;

        (mean_proj, covariance_proj)
    }

    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: &Measurement,
    ) -> Result<(Array1<f64>, Array2<f64>), FilterError> {
        let (projected_mean, projected_cov) = self.project(mean, covariance);

        let innovation = measurement.to_vector() - projected_mean;

        // K = P * H^T * S^-1
        let s_inv = invert_3x3(&projected_cov)?;

        let pht = covariance.dot(&self.update_mat.t()); // 5x3
        let kalman_gain = pht.dot(&s_inv); // 5x3

        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        Ok((new_mean, new_covariance))
    }
}

/// Invert the 3x3 innovation covariance with nalgebra (pure Rust).
fn invert_3x3(m: &Array2<f64>) -> Result<Array2<f64>, FilterError> {
    let mut nm = nalgebra::Matrix3::zeros();
    for i in 0..MEASUREMENT_DIM {
        for j in 0..MEASUREMENT_DIM {
            nm[(i, j)] = m[[i, j]];
        }
    }
    let inv = nm.try_inverse().ok_or(FilterError::SingularInnovation)?;
    Ok(Array2::from_shape_fn((MEASUREMENT_DIM, MEASUREMENT_DIM), |(i, j)| {
        inv[(i, j)]
    }))
}
