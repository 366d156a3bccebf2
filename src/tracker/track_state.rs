use crate::tracker::track::Track;

/// Lifecycle of the single tracked target.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TrackState {
    /// Waiting for a first detection
    #[default]
    Idle,
    /// Target acquired; coasting while measurements are missing
    Tracking(Track),
}

impl TrackState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking(_))
    }

    pub fn track(&self) -> Option<&Track> {
        match self {
            Self::Idle => None,
            Self::Tracking(track) => Some(track),
        }
    }
}
