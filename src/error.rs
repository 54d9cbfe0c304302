//! Error types shared across the crate.
//!
//! Two families live here. [`CoordinateError`] and [`RankingError`] are
//! precondition violations: the caller passed malformed data and should
//! fix the call. [`LocationError`] describes ordinary runtime failures of
//! location acquisition; those are carried as data inside
//! [`LocationState::Failed`](crate::state::LocationState::Failed) and are
//! never returned as `Err` from the lifecycle entry points.

use std::time::Duration;

use thiserror::Error;

/// A latitude/longitude pair that cannot describe a point on Earth.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Either component is NaN or infinite.
    #[error("coordinate components must be finite")]
    NotFinite,

    #[error("latitude {0} is outside -90..=90 degrees")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180..=180 degrees")]
    LongitudeOutOfRange(f64),
}

/// Invalid arguments passed to the ranking functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("invalid user coordinate: {0}")]
    InvalidUser(#[source] CoordinateError),

    #[error("invalid coordinate for facility {uid}: {source}")]
    InvalidFacility {
        uid: String,
        #[source]
        source: CoordinateError,
    },

    /// Facility identifiers must be unique within one ranking call.
    #[error("duplicate facility id: {0}")]
    DuplicateFacility(String),
}

/// Why a location request did not produce a fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user declined location access. Retrying only helps after the
    /// permission is changed at the platform level.
    #[error("location permission denied")]
    PermissionDenied,

    /// No fix arrived within the configured bound.
    #[error("no location fix within {0:?}")]
    Timeout(Duration),

    /// The platform location service failed; the detail is kept for
    /// diagnostics.
    #[error("location platform error: {0}")]
    Platform(String),
}

impl LocationError {
    /// Whether issuing the same request again may succeed without user
    /// intervention.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LocationError::PermissionDenied)
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
