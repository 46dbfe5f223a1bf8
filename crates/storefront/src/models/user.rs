//! Account domain types.

use serde::{Deserialize, Serialize};

use tanish_arts_core::{PasswordDigest, Username};

/// A registered account.
///
/// Accounts are created by sign-up and never deleted. An account without a
/// password digest signs in by username alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique, case-sensitive username.
    pub username: Username,
    /// Argon2 digest of the password, if one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<PasswordDigest>,
}

impl Account {
    /// Whether signing in requires a password.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
