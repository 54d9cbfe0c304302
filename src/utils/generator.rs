//! Generates mock facilities for tests and stub data sources.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::facility::{Facility, FacilityDetails, FacilityKind};
use crate::haversine::EARTH_RADIUS_KM;
use crate::location::Coordinate;
use crate::status::Status;

const KINDS: [FacilityKind; 4] = [
    FacilityKind::Hospital,
    FacilityKind::PrimaryHealthCenter,
    FacilityKind::Clinic,
    FacilityKind::EmergencyCenter,
];

const STATUSES: [Status; 3] = [Status::Available, Status::Busy, Status::Full];

const SPECIALTIES: [&str; 6] = [
    "Emergency",
    "Cardiology",
    "Neurology",
    "General Medicine",
    "Pediatrics",
    "Trauma",
];

/// Generates `capacity` facilities scattered uniformly within
/// `radius_km` of `center`.
///
/// Points are drawn in a local tangent plane and projected back to
/// degrees, which is accurate enough for city-scale radii. Latitudes are
/// kept inside the valid range and longitudes are wrapped, so every
/// generated facility passes [`Coordinate::validate`].
///
/// Facility ids are `facility_<n>` in generation order.
pub fn generate_facilities_near(
    center: &Coordinate,
    radius_km: f64,
    capacity: usize,
) -> Vec<Facility> {
    let mut rng = rand::thread_rng();
    let km_per_degree = EARTH_RADIUS_KM.to_radians();

    (0..capacity)
        .map(|n| {
            // sqrt keeps the density uniform over the disc
            let r = radius_km * rng.gen::<f64>().sqrt();
            let theta = rng.gen_range(0.0..std::f64::consts::TAU);

            let d_lat = r * theta.sin() / km_per_degree;
            let lat = (center.lat() + d_lat).clamp(-89.9, 89.9);
            let d_lon = r * theta.cos() / (km_per_degree * lat.to_radians().cos());
            let lon = wrap_longitude(center.lon() + d_lon);

            let kind = *KINDS.choose(&mut rng).unwrap_or(&FacilityKind::Clinic);
            let mut details = FacilityDetails::of_kind(kind);
            details.emergency |= rng.gen_bool(0.3);
            details.status = *STATUSES.choose(&mut rng).unwrap_or(&Status::Unknown);
            details.beds_available = rng.gen_range(0..30);
            details.rating = Some(rng.gen_range(30..=50) as f32 / 10.0);
            details.specialties = SPECIALTIES
                .choose_multiple(&mut rng, 2)
                .map(|s| s.to_string())
                .collect();

            Facility {
                uid: format!("facility_{}", n),
                name: format!("Facility {}", n),
                location: Coordinate {
                    latitude: lat.into(),
                    longitude: lon.into(),
                },
                details,
            }
        })
        .collect()
}

/// Maps any longitude into `-180..180`.
fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod generator_tests {
    use super::*;
    use crate::haversine;

    #[test]
    fn test_capacity_and_radius() {
        let center = Coordinate::new(28.6139, 77.2090).unwrap();
        let facilities = generate_facilities_near(&center, 5.0, 200);

        assert_eq!(facilities.len(), 200);
        for facility in &facilities {
            assert!(facility.location.validate().is_ok());
            // small slack for the planar projection
            assert!(haversine::distance(&center, &facility.location) <= 5.05);
        }
    }

    #[test]
    fn test_unique_ids() {
        let center = Coordinate::new(0.0, 0.0).unwrap();
        let facilities = generate_facilities_near(&center, 1.0, 50);
        let mut ids: Vec<&str> = facilities.iter().map(|f| f.uid.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_dateline_stays_valid() {
        let center = Coordinate::new(0.0, 179.99).unwrap();
        for facility in generate_facilities_near(&center, 50.0, 100) {
            assert!(facility.location.validate().is_ok());
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(77.0), 77.0);
    }

    #[test]
    fn test_zero_capacity() {
        let center = Coordinate::new(0.0, 0.0).unwrap();
        assert!(generate_facilities_near(&center, 1.0, 0).is_empty());
    }
}
