//! Navigation intents handed back to the presentation layer.

use serde::{Deserialize, Serialize};

/// Where the presentation layer should go after a command.
///
/// The storefront never routes by itself; it only says where the user is
/// expected to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Landing page, after signing in, signing up, signing out, or ordering.
    Home,
    /// Sign-in / account page, after a command that needs a session.
    Account,
    /// Checkout page, after "buy now".
    Checkout,
}

impl NavigationIntent {
    /// Route path used by the reference web front end.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Account => "/account",
            Self::Checkout => "/checkout",
        }
    }
}

impl std::fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
