//! Struct definitions and implementations for [`Coordinate`].
//!
//! A coordinate is the only geographic primitive in the crate. Both the
//! user's fix and every facility are positioned with one.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Valid latitude range, in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range, in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A [`Coordinate`] is a latitude/longitude pair in degrees. There is
/// no altitude: facilities are ranked by ground distance only.
///
/// The fields are wrapped in [`OrderedFloat`] so a coordinate can be
/// compared, hashed and used as a map key.
///
/// Out of range values are never clamped. Use [`Coordinate::new`] to
/// build a checked value, or [`Coordinate::validate`] on values that
/// were deserialized or built field by field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out of range
    /// values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let coordinate = Coordinate {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks that both components are finite and within range.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        let (latitude, longitude) = (self.lat(), self.lon());
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(())
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.latitude.into_inner()
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.longitude.into_inner()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat(), self.lon())
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
