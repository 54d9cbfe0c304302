//! Location acquisition state.
//!
//! - [`Fix`] - A single resolved reading from the location provider
//! - [`LocationState`] - What a consumer currently knows about its position

use chrono::{DateTime, Utc};

use super::location::Coordinate;
use crate::error::LocationError;

/// A single resolved coordinate reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,

    /// Horizontal accuracy radius in meters, when the platform reports
    /// one.
    pub accuracy_meters: Option<f64>,

    /// When the fix was taken.
    pub timestamp: DateTime<Utc>,
}

impl Fix {
    /// Creates a fix stamped with the current time.
    pub fn new(coordinate: Coordinate, accuracy_meters: Option<f64>) -> Self {
        Fix {
            coordinate,
            accuracy_meters,
            timestamp: Utc::now(),
        }
    }
}

/// What a consumer knows about its own position.
///
/// Exactly one variant holds at any time. Transitions are driven only
/// by [`LocationLifecycle`](crate::lifecycle::LocationLifecycle).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationState {
    /// No fix has been requested yet.
    #[default]
    Unknown,
    /// A request is in flight.
    Acquiring,
    Available(Fix),
    Failed(LocationError),
}

impl LocationState {
    /// The user's coordinate, if a fix is available.
    pub fn coordinate(&self) -> Option<&Coordinate> {
        match self {
            LocationState::Available(fix) => Some(&fix.coordinate),
            _ => None,
        }
    }

    pub fn fix(&self) -> Option<&Fix> {
        match self {
            LocationState::Available(fix) => Some(fix),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LocationError> {
        match self {
            LocationState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// `Available` and `Failed` end a one-shot request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LocationState::Available(_) | LocationState::Failed(_))
    }
}

impl std::fmt::Display for LocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationState::Unknown => write!(f, "Unknown"),
            LocationState::Acquiring => write!(f, "Acquiring"),
            LocationState::Available(fix) => write!(f, "Available {}", fix.coordinate),
            LocationState::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(LocationState::default(), LocationState::Unknown);
    }

    #[test]
    fn test_accessors() {
        let coordinate = Coordinate::new(28.6139, 77.2090).unwrap();
        let available = LocationState::Available(Fix::new(coordinate, Some(12.0)));
        assert_eq!(available.coordinate(), Some(&coordinate));
        assert_eq!(available.fix().and_then(|fix| fix.accuracy_meters), Some(12.0));
        assert!(available.is_terminal());
        assert!(available.error().is_none());

        let failed = LocationState::Failed(LocationError::PermissionDenied);
        assert!(failed.coordinate().is_none());
        assert_eq!(failed.error(), Some(&LocationError::PermissionDenied));
        assert!(failed.is_terminal());

        assert!(!LocationState::Acquiring.is_terminal());
        assert!(!LocationState::Unknown.is_terminal());
    }

    #[test]
    fn test_display() {
        let failed = LocationState::Failed(LocationError::PermissionDenied);
        assert_eq!(failed.to_string(), "Failed: location permission denied");
    }
}
