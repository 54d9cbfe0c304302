//! Struct definitions and implementations for healthcare facilities.
//!
//! The most generic form of a facility is [`Facility`]. Applications
//! usually carry richer records (a hospital with its doctors, a clinic
//! with opening hours...). Since Rust doesn't have a built-in way to
//! represent an interface type, we use an [`AsFacility`] trait so the
//! ranking functions can accept any "Facility-like" record and call its
//! [`as_facility`](AsFacility::as_facility) method to get a [`Facility`]
//! reference.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::location::Coordinate;
use super::status::Status;

/// Allows passing "Facility-like" objects to ranking and filtering
/// functions.
pub trait AsFacility {
    /// Returns the generic `Facility` struct that an object "extends".
    fn as_facility(&self) -> &Facility;

    fn get_uid(&self) -> &str {
        &self.as_facility().uid
    }
}

//------------------------------------------------------------------
// Structs and Implementations
//------------------------------------------------------------------

/// The kind of care a facility offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    /// Multi-specialty hospital.
    Hospital,
    /// Primary health center.
    PrimaryHealthCenter,
    Clinic,
    /// Stand-alone emergency and trauma center.
    EmergencyCenter,
}

/// Descriptive metadata. Never used to compute distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityDetails {
    pub kind: FacilityKind,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,

    /// Offers emergency services.
    #[serde(default)]
    pub emergency: bool,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub beds_available: u32,

    /// User rating out of 5.
    #[serde(default)]
    pub rating: Option<f32>,

    #[serde(default)]
    pub specialties: Vec<String>,
}

impl FacilityDetails {
    /// Details with only a kind set; everything else empty.
    pub fn of_kind(kind: FacilityKind) -> Self {
        FacilityDetails {
            kind,
            address: String::new(),
            phone: String::new(),
            emergency: kind == FacilityKind::EmergencyCenter,
            status: Status::Unknown,
            beds_available: 0,
            rating: None,
            specialties: Vec::new(),
        }
    }
}

/// A healthcare facility positioned on the map.
///
/// Facilities are immutable inputs to ranking. Ranking produces
/// [`RankedFacility`] values that borrow the facility instead of
/// modifying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Unique within one ranking call.
    pub uid: String,

    /// Display name.
    pub name: String,

    /// Denotes the geographical position of the facility.
    ///
    /// See also [`Coordinate`].
    pub location: Coordinate,

    pub details: FacilityDetails,
}

impl Facility {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        details: FacilityDetails,
    ) -> Self {
        Facility {
            uid: uid.into(),
            name: name.into(),
            location,
            details,
        }
    }
}

impl AsFacility for Facility {
    fn as_facility(&self) -> &Facility {
        self
    }
}

/// A facility annotated with its distance from the user.
///
/// `distance_km` is [`None`] when no user location was known at ranking
/// time. That is not the same as a distance of zero, which means the
/// facility sits exactly at the user's position.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFacility<'a> {
    pub facility: &'a Facility,

    /// Great-circle distance in kilometers.
    pub distance_km: Option<OrderedFloat<f64>>,

    /// Position of the facility in the ranking input. Used as the
    /// tie-break between equal distances.
    pub index: usize,
}

impl RankedFacility<'_> {
    /// Distance in kilometers, if known.
    pub fn distance(&self) -> Option<f64> {
        self.distance_km.map(OrderedFloat::into_inner)
    }

    /// Distance formatted for display, e.g. `"0.8 km"`.
    pub fn distance_label(&self) -> Option<String> {
        self.distance().map(|km| format!("{:.1} km", km))
    }
}

/// Lets filtered views (`Vec<&Facility>`) be ranked directly.
impl<F: AsFacility> AsFacility for &F {
    fn as_facility(&self) -> &Facility {
        (**self).as_facility()
    }
}

impl AsFacility for RankedFacility<'_> {
    fn as_facility(&self) -> &Facility {
        self.facility
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod facility_tests {
    use super::*;

    /// A richer application record that wraps a facility.
    struct Hospital {
        facility: Facility,
        #[allow(dead_code)]
        doctors_on_call: u32,
    }

    impl AsFacility for Hospital {
        fn as_facility(&self) -> &Facility {
            &self.facility
        }
    }

    #[test]
    fn test_get_uid_from_wrapper() {
        let hospital = Hospital {
            facility: Facility::new(
                "city-general",
                "City General Hospital",
                Coordinate::new(28.6139, 77.2090).unwrap(),
                FacilityDetails::of_kind(FacilityKind::Hospital),
            ),
            doctors_on_call: 4,
        };
        assert_eq!(hospital.get_uid(), "city-general");
        assert_eq!(hospital.as_facility().name, "City General Hospital");
    }

    #[test]
    fn test_emergency_center_defaults_to_emergency() {
        assert!(FacilityDetails::of_kind(FacilityKind::EmergencyCenter).emergency);
        assert!(!FacilityDetails::of_kind(FacilityKind::Clinic).emergency);
    }

    #[test]
    fn test_distance_label() {
        let facility = Facility::new(
            "phc-1",
            "Central Primary Health Center",
            Coordinate::new(28.6169, 77.2085).unwrap(),
            FacilityDetails::of_kind(FacilityKind::PrimaryHealthCenter),
        );
        let ranked = RankedFacility {
            facility: &facility,
            distance_km: Some(OrderedFloat(0.8349)),
            index: 0,
        };
        assert_eq!(ranked.distance_label().as_deref(), Some("0.8 km"));

        let unranked = RankedFacility {
            distance_km: None,
            ..ranked
        };
        assert_eq!(unranked.distance_label(), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "uid": "clinic-7",
            "name": "Community Health Clinic",
            "location": { "latitude": 28.61, "longitude": 77.23 },
            "details": { "kind": "clinic", "status": "full", "specialties": ["Preventive Care"] }
        }"#;
        let facility: Facility = serde_json::from_str(json).unwrap();
        assert_eq!(facility.details.kind, FacilityKind::Clinic);
        assert_eq!(facility.details.status, Status::Full);
        assert_eq!(facility.details.beds_available, 0);
        assert!(!facility.details.emergency);
        assert_eq!(facility.location.lat(), 28.61);
    }
}
