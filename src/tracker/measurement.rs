//! Measurement and prediction vectors exchanged with the outside world.

use ndarray::{Array1, arr1};
use thiserror::Error;

/// Errors from converting raw vectors into a [`Measurement`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("expected a {expected}-element measurement, got {got}")]
    WrongDimension { expected: usize, got: usize },
}

/// Observed position and size of the target, `[x, y, r]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub x: f64,
    pub y: f64,
    /// Size (radius) of the target
    pub r: f64,
}

impl Measurement {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.r]
    }

    pub(crate) fn to_vector(self) -> Array1<f64> {
        arr1(&self.to_array())
    }
}

impl From<[f64; 3]> for Measurement {
    fn from([x, y, r]: [f64; 3]) -> Self {
        Self { x, y, r }
    }
}

impl TryFrom<&[f64]> for Measurement {
    type Error = MeasurementError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            &[x, y, r] => Ok(Self { x, y, r }),
            _ => Err(MeasurementError::WrongDimension {
                expected: 3,
                got: values.len(),
            }),
        }
    }
}

impl TryFrom<&[f32]> for Measurement {
    type Error = MeasurementError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        match values {
            &[x, y, r] => Ok(Self::new(f64::from(x), f64::from(y), f64::from(r))),
            _ => Err(MeasurementError::WrongDimension {
                expected: 3,
                got: values.len(),
            }),
        }
    }
}

/// Predicted position and size of the target, `[x, y, r]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Prediction {
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.r]
    }

    /// Project a 5-dim state mean `[x, y, vx, vy, r]` onto `[x, y, r]`.
    pub(crate) fn from_mean(mean: &Array1<f64>) -> Self {
        Self {
            x: mean[0],
            y: mean[1],
            r: mean[4],
        }
    }
}
