//! Proximity ranking of facilities around the user.
//!
//! [`rank`] is pure: it holds no state, never mutates its input and
//! returns the same output for the same arguments, so it can be called
//! from any number of places at once.

use std::collections::HashSet;

use ordered_float::OrderedFloat;

use crate::error::RankingError;
use crate::facility::{AsFacility, RankedFacility};
use crate::haversine;
use crate::location::Coordinate;
use crate::state::LocationState;

/// Ranks facilities by great-circle distance from the user.
///
/// # Arguments
/// * `user` - The user's coordinate, or [`None`] when no fix is known.
/// * `facilities` - Any "Facility-like" records.
///
/// # Returns
/// When `user` is [`None`], every facility in input order with its
/// distance unset. Otherwise every facility sorted ascending by
/// distance; equal distances keep their input order.
///
/// # Errors
/// Malformed input is rejected before any distance is computed:
/// an out of range user or facility coordinate, or two facilities
/// sharing an id.
///
/// # Time Complexity
/// *O*(*n* log *n*).
pub fn rank<'a, F: AsFacility>(
    user: Option<&Coordinate>,
    facilities: &'a [F],
) -> Result<Vec<RankedFacility<'a>>, RankingError> {
    validate(user, facilities)?;

    let mut ranked: Vec<RankedFacility<'a>> = facilities
        .iter()
        .enumerate()
        .map(|(index, f)| {
            let facility = f.as_facility();
            RankedFacility {
                facility,
                distance_km: user
                    .map(|user| OrderedFloat(haversine::distance(user, &facility.location))),
                index,
            }
        })
        .collect();

    if user.is_some() {
        // stable, and the index makes the tie-break explicit
        ranked.sort_by_key(|r| (r.distance_km, r.index));
    }

    debug!(
        "Ranked {} facilities (user location {})",
        ranked.len(),
        if user.is_some() { "known" } else { "unknown" }
    );
    Ok(ranked)
}

/// Ranks facilities against whatever the location lifecycle currently
/// knows. Only [`LocationState::Available`] provides a user coordinate;
/// every other state ranks as "location unknown".
pub fn rank_for_state<'a, F: AsFacility>(
    state: &LocationState,
    facilities: &'a [F],
) -> Result<Vec<RankedFacility<'a>>, RankingError> {
    rank(state.coordinate(), facilities)
}

/// Returns at most `limit` facilities closest to the user.
///
/// Without a user coordinate the first `limit` facilities are returned
/// in input order.
pub fn nearest<'a, F: AsFacility>(
    user: Option<&Coordinate>,
    facilities: &'a [F],
    limit: usize,
) -> Result<Vec<RankedFacility<'a>>, RankingError> {
    let mut ranked = rank(user, facilities)?;
    ranked.truncate(limit);
    Ok(ranked)
}

fn validate<F: AsFacility>(
    user: Option<&Coordinate>,
    facilities: &[F],
) -> Result<(), RankingError> {
    if let Some(user) = user {
        user.validate().map_err(|err| {
            warn!("Rejecting ranking request, user coordinate {}: {}", user, err);
            RankingError::InvalidUser(err)
        })?;
    }

    let mut seen = HashSet::with_capacity(facilities.len());
    for f in facilities {
        let facility = f.as_facility();
        facility
            .location
            .validate()
            .map_err(|source| RankingError::InvalidFacility {
                uid: facility.uid.clone(),
                source,
            })?;
        if !seen.insert(facility.uid.as_str()) {
            return Err(RankingError::DuplicateFacility(facility.uid.clone()));
        }
    }
    Ok(())
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
