use ndarray::Array1;

use crate::tracker::measurement::Prediction;

/// Snapshot of the filter state `[x, y, vx, vy, r]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    pub x: f64,
    pub y: f64,
    /// Velocity along x, in units per second
    pub vx: f64,
    /// Velocity along y, in units per second
    pub vy: f64,
    pub r: f64,
}

impl MotionState {
    pub(crate) fn from_mean(mean: &Array1<f64>) -> Self {
        Self {
            x: mean[0],
            y: mean[1],
            vx: mean[2],
            vy: mean[3],
            r: mean[4],
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [self.x, self.y, self.vx, self.vy, self.r]
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn prediction(&self) -> Prediction {
        Prediction {
            x: self.x,
            y: self.y,
            r: self.r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_from_mean() {
        let state = MotionState::from_mean(&arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(state.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(state.speed(), 5.0);
        assert_eq!(state.prediction().to_array(), [1.0, 2.0, 5.0]);
    }
}
