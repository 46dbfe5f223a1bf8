//! Session-related types.

use serde::{Deserialize, Serialize};

use tanish_arts_core::Username;

/// Identity of the signed-in user.
///
/// Minimal data persisted to identify the session across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username of the signed-in account.
    pub username: Username,
}

impl CurrentUser {
    /// Session for `username`.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self { username }
    }
}
