//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Account registry, password hashing, credential checks
//! - `notifications` - Ordered queue of user-facing messages
//! - `location` - Live-location queries with a latest-request guard

pub mod auth;
pub mod location;
pub mod notifications;

pub use auth::{AccountRegistry, AuthError, PasswordHashing};
pub use location::{
    DEFAULT_CITY_LABEL, LocationFix, LocationSensor, LocationTicket, LocationTracker, SensorError,
    StaticSensor,
};
pub use notifications::NotificationChannel;
