//! Unified error handling for storefront commands.
//!
//! A command that returns `Err` has left every piece of state unchanged and
//! has already posted a notification explaining why. Callers only need the
//! error to decide where to navigate.

use thiserror::Error;

use crate::navigation::NavigationIntent;
use crate::services::auth::AuthError;

/// Why a storefront command was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The command needs a signed-in user.
    #[error("sign-in required")]
    AuthenticationRequired,

    /// Sign-up or sign-in was rejected.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A review rating outside the accepted range.
    #[error("invalid review rating: {rating}")]
    InvalidRating {
        /// The rejected rating.
        rating: u8,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

impl CommerceError {
    /// Where the presentation layer should send the user, if anywhere.
    #[must_use]
    pub const fn navigation(&self) -> Option<NavigationIntent> {
        match self {
            Self::AuthenticationRequired => Some(NavigationIntent::Account),
            Self::Auth(_) | Self::InvalidRating { .. } | Self::EmptyCart => None,
        }
    }
}

/// Result type alias for `CommerceError`.
pub type Result<T> = std::result::Result<T, CommerceError>;
