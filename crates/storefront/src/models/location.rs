//! Live location snapshot.

use serde::{Deserialize, Serialize};

/// A geographic position reported by the device sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The most recent live-location query and its outcome.
///
/// Session-scoped and never persisted. At most one of `coordinates`/`city`
/// and `error` is meaningful at a time, and all three are empty while
/// `loading`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveLocation {
    pub coordinates: Option<Coordinates>,
    pub city: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl LiveLocation {
    /// Snapshot of a query in flight.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Snapshot of a successful fix.
    #[must_use]
    pub fn located(coordinates: Coordinates, city: impl Into<String>) -> Self {
        Self {
            coordinates: Some(coordinates),
            city: Some(city.into()),
            error: None,
            loading: false,
        }
    }

    /// Snapshot of a failed query.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether the snapshot holds nothing at all.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }
}
