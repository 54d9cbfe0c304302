//! Narrowing a facility list before it is ranked.
//!
//! Filtering keeps the input order, so its output can be fed straight
//! into [`rank`](super::ranking::rank) and the tie-break still follows
//! the original listing.

use crate::facility::{AsFacility, Facility, FacilityKind};

/// Category tabs shown above a facility list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FacilityFilter {
    #[default]
    All,
    /// Facilities offering emergency services, whatever their kind.
    Emergency,
    Kind(FacilityKind),
}

impl FacilityFilter {
    pub fn matches(&self, facility: &Facility) -> bool {
        match self {
            FacilityFilter::All => true,
            FacilityFilter::Emergency => facility.details.emergency,
            FacilityFilter::Kind(kind) => facility.details.kind == *kind,
        }
    }
}

/// Case-insensitive match of `query` against the facility name, address
/// and specialties. A blank query matches everything.
pub fn search(facility: &Facility, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    facility.name.to_lowercase().contains(&query)
        || facility.details.address.to_lowercase().contains(&query)
        || facility
            .details
            .specialties
            .iter()
            .any(|s| s.to_lowercase().contains(&query))
}

/// Keeps the facilities accepted by both `filter` and `query`, in input
/// order.
pub fn apply<'a, F: AsFacility>(
    filter: FacilityFilter,
    query: &str,
    facilities: &'a [F],
) -> Vec<&'a F> {
    let kept: Vec<&'a F> = facilities
        .iter()
        .filter(|f| {
            let facility = f.as_facility();
            filter.matches(facility) && search(facility, query)
        })
        .collect();
    debug!(
        "Filter {:?} with query {:?} kept {} of {} facilities",
        filter,
        query,
        kept.len(),
        facilities.len()
    );
    kept
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod filter_tests {
    use super::*;
    use crate::algorithms::ranking::rank;
    use crate::facility::FacilityDetails;
    use crate::location::Coordinate;

    fn facilities() -> Vec<Facility> {
        let mut general = FacilityDetails::of_kind(FacilityKind::Hospital);
        general.emergency = true;
        general.address = "123 Medical Center Dr".to_string();
        general.specialties = vec!["Emergency".into(), "Cardiology".into(), "Neurology".into()];

        let mut phc = FacilityDetails::of_kind(FacilityKind::PrimaryHealthCenter);
        phc.address = "456 Health St".to_string();
        phc.specialties = vec!["General Medicine".into(), "Pediatrics".into()];

        let mut medicare = FacilityDetails::of_kind(FacilityKind::EmergencyCenter);
        medicare.address = "789 Emergency Ave".to_string();
        medicare.specialties = vec!["Trauma".into(), "Critical Care".into()];

        let mut clinic = FacilityDetails::of_kind(FacilityKind::Clinic);
        clinic.address = "321 Community Rd".to_string();
        clinic.specialties = vec!["General Medicine".into(), "Preventive Care".into()];

        vec![
            Facility::new(
                "1",
                "City General Hospital",
                Coordinate::new(28.6200, 77.2100).unwrap(),
                general,
            ),
            Facility::new(
                "2",
                "Central Primary Health Center",
                Coordinate::new(28.6150, 77.2080).unwrap(),
                phc,
            ),
            Facility::new(
                "3",
                "MediCare Emergency Center",
                Coordinate::new(28.6300, 77.2200).unwrap(),
                medicare,
            ),
            Facility::new(
                "4",
                "Community Health Clinic",
                Coordinate::new(28.6100, 77.2000).unwrap(),
                clinic,
            ),
        ]
    }

    fn uids(kept: &[&Facility]) -> Vec<String> {
        kept.iter().map(|f| f.uid.clone()).collect()
    }

    #[test]
    fn test_filter_tabs() {
        let facilities = facilities();
        assert_eq!(
            uids(&apply(FacilityFilter::All, "", &facilities)),
            vec!["1", "2", "3", "4"]
        );
        assert_eq!(
            uids(&apply(FacilityFilter::Emergency, "", &facilities)),
            vec!["1", "3"]
        );
        assert_eq!(
            uids(&apply(
                FacilityFilter::Kind(FacilityKind::PrimaryHealthCenter),
                "",
                &facilities
            )),
            vec!["2"]
        );
        assert_eq!(
            uids(&apply(
                FacilityFilter::Kind(FacilityKind::Clinic),
                "",
                &facilities
            )),
            vec!["4"]
        );
    }

    #[test]
    fn test_search() {
        let facilities = facilities();
        assert_eq!(
            uids(&apply(FacilityFilter::All, "general medicine", &facilities)),
            vec!["2", "4"]
        );
        assert_eq!(
            uids(&apply(FacilityFilter::All, "  EMERGENCY ", &facilities)),
            vec!["1", "3"]
        );
        assert_eq!(
            uids(&apply(FacilityFilter::All, "community rd", &facilities)),
            vec!["4"]
        );
        assert!(apply(FacilityFilter::All, "dentist", &facilities).is_empty());
    }

    #[test]
    fn test_filter_then_rank() {
        let facilities = facilities();
        let user = Coordinate::new(28.6139, 77.2090).unwrap();

        let emergency = apply(FacilityFilter::Emergency, "", &facilities);
        let ranked = rank(Some(&user), &emergency).unwrap();
        let ranked_uids: Vec<&str> = ranked.iter().map(|r| r.facility.uid.as_str()).collect();
        assert_eq!(ranked_uids, vec!["1", "3"]);
        assert_eq!(ranked[1].index, 1);
    }
}
