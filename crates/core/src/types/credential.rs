//! Password credential types.
//!
//! Type-safe wrapper for stored password digests.

use serde::{Deserialize, Serialize};

/// A password digest in PHC string format (e.g. `$argon2id$v=19$...`).
///
/// This never holds a plaintext password. Producing and verifying digests
/// is the storefront's job; this type only carries them between the account
/// registry and the durable store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an already-computed PHC digest string.
    #[must_use]
    pub const fn new(phc: String) -> Self {
        Self(phc)
    }

    /// Get the digest as a PHC string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner PHC string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Digests stay out of logs even though they are not plaintext.
impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
