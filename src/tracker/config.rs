//! Tunable parameters of the state estimator.

use thiserror::Error;

/// Smallest accepted noise gain.
pub const MIN_NOISE_GAIN: u32 = 1;
/// Largest accepted noise gain.
pub const MAX_NOISE_GAIN: u32 = 1000;
/// Factor turning a gain into a covariance diagonal value.
pub const NOISE_SCALE: f64 = 1e-3;

pub const DEFAULT_PROCESS_NOISE_GAIN: u32 = 100;
pub const DEFAULT_MEASUREMENT_NOISE_GAIN: u32 = 10;
/// Consecutive empty cycles after which the track is dropped.
pub const DEFAULT_LOST_THRESHOLD: u32 = 50;

/// Errors raised while building an [`EstimatorConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("noise gain {value} is outside [{min}, {max}]")]
    GainOutOfRange { value: u32, min: u32, max: u32 },
    #[error("lost threshold must be at least one cycle")]
    ZeroLostThreshold,
}

/// Integer noise gain in `[MIN_NOISE_GAIN, MAX_NOISE_GAIN]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct NoiseGain(u32);

impl NoiseGain {
    /// Reject gains outside the accepted range.
    pub fn new(value: u32) -> Result<Self, ConfigError> {
        if (MIN_NOISE_GAIN..=MAX_NOISE_GAIN).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::GainOutOfRange {
                value,
                min: MIN_NOISE_GAIN,
                max: MAX_NOISE_GAIN,
            })
        }
    }

    /// Clamp any value into the accepted range.
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(MIN_NOISE_GAIN, MAX_NOISE_GAIN))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Covariance diagonal value for this gain.
    pub fn variance(self) -> f64 {
        NOISE_SCALE * f64::from(self.0)
    }
}

impl TryFrom<u32> for NoiseGain {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoiseGain> for u32 {
    fn from(gain: NoiseGain) -> Self {
        gain.0
    }
}

/// Configuration for the [`StateEstimator`](crate::tracker::StateEstimator).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConfig {
    /// Gain of the process noise covariance `Q`.
    pub process_noise_gain: NoiseGain,
    /// Gain of the measurement noise covariance `R`.
    pub measurement_noise_gain: NoiseGain,
    /// Consecutive cycles without a measurement before the track is dropped.
    pub lost_threshold: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            process_noise_gain: NoiseGain(DEFAULT_PROCESS_NOISE_GAIN),
            measurement_noise_gain: NoiseGain(DEFAULT_MEASUREMENT_NOISE_GAIN),
            lost_threshold: DEFAULT_LOST_THRESHOLD,
        }
    }
}

impl EstimatorConfig {
    pub fn new(process_noise_gain: u32, measurement_noise_gain: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            process_noise_gain: NoiseGain::new(process_noise_gain)?,
            measurement_noise_gain: NoiseGain::new(measurement_noise_gain)?,
            ..Self::default()
        })
    }

    pub fn with_lost_threshold(mut self, lost_threshold: u32) -> Result<Self, ConfigError> {
        self.lost_threshold = lost_threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lost_threshold == 0 {
            return Err(ConfigError::ZeroLostThreshold);
        }
        Ok(())
    }
}
