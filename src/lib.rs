//! Healthcare Facility Proximity Library.
//! Ranks facilities by distance from the user and manages how the
//! user's location is acquired.
//!
//! - [`algorithms::ranking`] - pure haversine ranking with a stable
//!   tie-break
//! - [`algorithms::filter`] - category and text filters applied before
//!   ranking
//! - [`lifecycle`] - one-shot and continuous location acquisition over
//!   injectable platform services

#[macro_use]
extern crate log;

pub mod types {
    pub mod facility;
    pub mod location;
    pub mod state;
    pub mod status;
}

pub mod utils {
    pub mod generator;
    pub mod haversine;
}

pub mod algorithms {
    pub mod filter;
    pub mod ranking;
}

pub mod error;
pub mod lifecycle;
pub mod source;

pub use algorithms::{filter, ranking};
pub use types::{facility, location, state, status};
pub use utils::{generator, haversine};

pub use error::{CoordinateError, LocationError, RankingError};
pub use facility::{AsFacility, Facility, FacilityDetails, FacilityKind, RankedFacility};
pub use lifecycle::{LocationLifecycle, LocationOptions, Subscription};
pub use location::Coordinate;
pub use ranking::{nearest, rank, rank_for_state};
pub use state::{Fix, LocationState};
