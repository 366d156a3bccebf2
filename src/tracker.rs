mod config;
mod estimator;
mod kalman_filter;
mod measurement;
mod motion_state;
mod track;
mod track_state;

pub use config::{
    ConfigError, DEFAULT_LOST_THRESHOLD, DEFAULT_MEASUREMENT_NOISE_GAIN,
    DEFAULT_PROCESS_NOISE_GAIN, EstimatorConfig, MAX_NOISE_GAIN, MIN_NOISE_GAIN, NOISE_SCALE,
    NoiseGain,
};
pub use estimator::StateEstimator;
pub use kalman_filter::{FilterError, KalmanFilter, MEASUREMENT_DIM, STATE_DIM};
pub use measurement::{Measurement, MeasurementError, Prediction};
pub use motion_state::MotionState;
pub use track::Track;
pub use track_state::TrackState;
