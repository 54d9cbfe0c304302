//! Definition for the [`Status`] type, implemented by an enum.

use serde::{Deserialize, Serialize};

/// Represents the current occupancy of a
/// [`Facility`](super::facility::Facility).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Accepting patients with short waits.
    Available,
    /// Accepting patients, long waits expected.
    Busy,
    /// No capacity left.
    Full,
    #[default]
    Unknown,
}

impl Status {
    /// Whether a patient can currently be admitted.
    pub fn is_accepting(&self) -> bool {
        matches!(self, Status::Available | Status::Busy)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Available => write!(f, "Available"),
            Status::Busy => write!(f, "Busy"),
            Status::Full => write!(f, "Full"),
            Status::Unknown => write!(f, "Unknown"),
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_accepting() {
        assert!(Status::Available.is_accepting());
        assert!(Status::Busy.is_accepting());
        assert!(!Status::Full.is_accepting());
        assert!(!Status::Unknown.is_accepting());
    }

    #[test]
    fn test_deserialize_lowercase() {
        let status: Status = serde_json::from_str("\"busy\"").unwrap();
        assert_eq!(status, Status::Busy);
    }
}
