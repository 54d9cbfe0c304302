//! Where facility lists come from.
//!
//! Ranking only needs a slice of facilities. A [`FacilitySource`]
//! produces one, either from memory or from a remote directory service.

use async_trait::async_trait;

use crate::facility::Facility;

/// Supplies the facilities to rank.
#[async_trait]
pub trait FacilitySource: Send + Sync {
    /// Returns the current facility list.
    async fn facilities(&self) -> Vec<Facility>;
}

/// A fixed, in-memory facility list.
#[derive(Debug, Clone, Default)]
pub struct StaticFacilities {
    facilities: Vec<Facility>,
}

impl StaticFacilities {
    pub fn new(facilities: Vec<Facility>) -> Self {
        StaticFacilities { facilities }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl From<Vec<Facility>> for StaticFacilities {
    fn from(facilities: Vec<Facility>) -> Self {
        StaticFacilities::new(facilities)
    }
}

#[async_trait]
impl FacilitySource for StaticFacilities {
    async fn facilities(&self) -> Vec<Facility> {
        self.facilities.clone()
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
