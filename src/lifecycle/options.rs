//! Options passed with every location request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bound on a single fix request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Location request options.
///
/// Deserializes from the host's configuration; missing fields take
/// their defaults.
///
/// ```
/// use medimap::lifecycle::LocationOptions;
///
/// let options: LocationOptions = serde_json::from_str(r#"{ "timeout_ms": 5000 }"#).unwrap();
/// assert_eq!(options.timeout().as_secs(), 5);
/// assert!(options.high_accuracy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationOptions {
    /// Bound on a single fix request, in milliseconds.
    pub timeout_ms: u64,

    /// Prefer accuracy over speed (GPS rather than network positioning).
    pub high_accuracy: bool,

    /// Accept a cached platform reading at most this old. [`None`]
    /// lets the platform decide.
    pub maximum_age_ms: Option<u64>,
}

impl LocationOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Option<Duration> {
        self.maximum_age_ms.map(Duration::from_millis)
    }

    /// Sets the fix timeout. Durations beyond `u64::MAX` milliseconds
    /// saturate.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = millis(timeout);
        self
    }
}

impl Default for LocationOptions {
    fn default() -> Self {
        LocationOptions {
            timeout_ms: millis(DEFAULT_TIMEOUT),
            high_accuracy: true,
            maximum_age_ms: None,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod options_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LocationOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(10));
        assert!(options.high_accuracy);
        assert_eq!(options.maximum_age(), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: LocationOptions =
            serde_json::from_str(r#"{ "high_accuracy": false, "maximum_age_ms": 30000 }"#)
                .unwrap();
        assert_eq!(options.timeout(), DEFAULT_TIMEOUT);
        assert!(!options.high_accuracy);
        assert_eq!(options.maximum_age(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_with_timeout() {
        let options = LocationOptions::default().with_timeout(Duration::from_millis(250));
        assert_eq!(options.timeout_ms, 250);
    }

    #[test]
    fn test_with_timeout_saturates() {
        let options = LocationOptions::default().with_timeout(Duration::MAX);
        assert_eq!(options.timeout_ms, u64::MAX);
    }
}
