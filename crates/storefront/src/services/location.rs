//! Live-location queries.
//!
//! A query is started with [`LocationTracker::begin`], which hands out a
//! [`LocationTicket`], and finished with [`LocationTracker::complete`]. Only
//! the ticket from the most recent `begin` is honored: a result that arrives
//! after a newer query started (or after the snapshot was reset) is dropped.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

use crate::models::{Coordinates, LiveLocation};

/// City label used when the sensor does not name one.
pub const DEFAULT_CITY_LABEL: &str = "Your Current Location";

/// A position reported by a [`LocationSensor`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    /// Human-readable place name, if the sensor resolved one.
    pub city: Option<String>,
}

impl LocationFix {
    #[must_use]
    pub const fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            city: None,
        }
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// The city label to display.
    #[must_use]
    pub fn city_label(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY_LABEL)
    }
}

/// Why a location query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
    #[error("User denied the request for Geolocation.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("The request to get user location timed out.")]
    Timeout,
    #[error("An unknown error occurred while fetching location.")]
    Unknown,
}

/// Source of device positions.
pub trait LocationSensor {
    /// Whether the device has a sensor at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Resolve the current position once.
    fn current_position(&self) -> impl Future<Output = Result<LocationFix, SensorError>>;
}

/// A sensor that always answers with the same outcome.
#[derive(Debug, Clone)]
pub struct StaticSensor {
    outcome: Result<LocationFix, SensorError>,
}

impl StaticSensor {
    /// Sensor that reports `fix`.
    #[must_use]
    pub const fn located(fix: LocationFix) -> Self {
        Self { outcome: Ok(fix) }
    }

    /// Sensor whose queries fail with `error`.
    #[must_use]
    pub const fn failing(error: SensorError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    /// A device without a sensor.
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::failing(SensorError::Unsupported)
    }
}

impl LocationSensor for StaticSensor {
    fn is_available(&self) -> bool {
        self.outcome != Err(SensorError::Unsupported)
    }

    async fn current_position(&self) -> Result<LocationFix, SensorError> {
        self.outcome.clone()
    }
}

/// Proof of which query a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationTicket {
    generation: u64,
}

/// Live-location snapshot plus the latest-query guard.
#[derive(Debug, Clone, Default)]
pub struct LocationTracker {
    snapshot: LiveLocation,
    generation: u64,
}

impl LocationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a query: the snapshot goes back to loading and every earlier
    /// ticket stops being honored.
    pub fn begin(&mut self) -> LocationTicket {
        self.generation = self.generation.wrapping_add(1);
        self.snapshot = LiveLocation::pending();
        LocationTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of the query identified by `ticket`.
    ///
    /// Returns `false`, leaving the snapshot untouched, if the ticket is
    /// stale.
    pub fn complete(
        &mut self,
        ticket: LocationTicket,
        result: &Result<LocationFix, SensorError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "Ignoring stale location result"
            );
            return false;
        }

        self.snapshot = match result {
            Ok(fix) => LiveLocation::located(fix.coordinates, fix.city_label()),
            Err(error) => LiveLocation::failed(error.to_string()),
        };
        // A ticket is honored once.
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Record that the device has no sensor. Invalidates outstanding tickets.
    ///
    /// Any previous coordinates and city stay in the snapshot.
    pub fn mark_unsupported(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.snapshot.error = Some(SensorError::Unsupported.to_string());
        self.snapshot.loading = false;
    }

    /// Clear the snapshot and invalidate outstanding tickets.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.snapshot = LiveLocation::default();
    }

    /// Whether results for `ticket` would still be applied.
    #[must_use]
    pub const fn is_current(&self, ticket: LocationTicket) -> bool {
        ticket.generation == self.generation
    }

    #[must_use]
    pub const fn snapshot(&self) -> &LiveLocation {
        &self.snapshot
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fix() -> LocationFix {
        LocationFix::new(Coordinates {
            latitude: 26.9124,
            longitude: 75.7873,
        })
    }

    #[test]
    fn test_begin_sets_loading() {
        let mut tracker = LocationTracker::new();
        tracker.begin();
        assert!(tracker.snapshot().loading);
        assert!(tracker.snapshot().error.is_none());
    }

    #[test]
    fn test_complete_success_uses_default_label() {
        let mut tracker = LocationTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, &Ok(fix())));

        let snapshot = tracker.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.city.as_deref(), Some(DEFAULT_CITY_LABEL));
        assert_eq!(snapshot.coordinates, Some(fix().coordinates));
    }

    #[test]
    fn test_complete_failure_records_message() {
        let mut tracker = LocationTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, &Err(SensorError::PermissionDenied)));

        let snapshot = tracker.snapshot();
        assert_eq!(
            snapshot.error.as_deref(),
            Some("User denied the request for Geolocation.")
        );
        assert!(snapshot.coordinates.is_none());
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut tracker = LocationTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.complete(first, &Ok(fix().with_city("Stale"))));
        assert!(tracker.snapshot().loading);

        assert!(tracker.complete(second, &Ok(fix().with_city("Jaipur"))));
        assert_eq!(tracker.snapshot().city.as_deref(), Some("Jaipur"));
    }

    #[test]
    fn test_ticket_is_honored_once() {
        let mut tracker = LocationTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, &Ok(fix().with_city("Jaipur"))));
        assert!(!tracker.complete(ticket, &Err(SensorError::Unknown)));
        assert_eq!(tracker.snapshot().city.as_deref(), Some("Jaipur"));
    }

    #[test]
    fn test_reset_invalidates_pending_ticket() {
        let mut tracker = LocationTracker::new();
        let ticket = tracker.begin();
        tracker.reset();

        assert!(!tracker.complete(ticket, &Ok(fix())));
        assert!(tracker.snapshot().is_cleared());
    }

    #[test]
    fn test_mark_unsupported_keeps_last_fix() {
        let mut tracker = LocationTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, &Ok(fix().with_city("Jaipur"))));
        tracker.mark_unsupported();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.city.as_deref(), Some("Jaipur"));
        assert_eq!(snapshot.coordinates, Some(fix().coordinates));
        assert_eq!(
            snapshot.error.as_deref(),
            Some(SensorError::Unsupported.to_string().as_str())
        );
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_static_sensor() {
        let sensor = StaticSensor::located(fix().with_city("Udaipur"));
        assert!(sensor.is_available());
        let reported = sensor.current_position().await.unwrap();
        assert_eq!(reported.city_label(), "Udaipur");

        assert!(!StaticSensor::unsupported().is_available());
        assert!(StaticSensor::failing(SensorError::Timeout).is_available());
    }
}
