//! Authentication service.
//!
//! Keeps the registry of accounts and checks credentials against it.
//! Passwords are stored as Argon2id digests; accounts may also be created
//! without a password and then sign in by username alone.

mod error;

pub use error::AuthError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::warn;

use tanish_arts_core::{PasswordDigest, Username};

use crate::models::Account;

/// Cost profile for new password digests.
///
/// Verification always uses the parameters recorded in the stored digest, so
/// changing the profile never locks out existing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordHashing {
    /// Argon2id with the library's recommended parameters.
    #[default]
    Standard,
    /// Argon2id with the smallest accepted parameters. For tests and demos.
    Minimal,
}

impl PasswordHashing {
    fn hasher(self) -> Result<Argon2<'static>, AuthError> {
        match self {
            Self::Standard => Ok(Argon2::default()),
            Self::Minimal => {
                let params = Params::new(
                    Params::MIN_M_COST,
                    Params::MIN_T_COST,
                    Params::MIN_P_COST,
                    None,
                )
                .map_err(|_| AuthError::PasswordHash)?;
                Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
            }
        }
    }
}

impl std::str::FromStr for PasswordHashing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!("expected `standard` or `minimal`, got `{s}`")),
        }
    }
}

/// Registry of accounts, in sign-up order.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    hashing: PasswordHashing,
}

impl AccountRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new(hashing: PasswordHashing) -> Self {
        Self {
            accounts: Vec::new(),
            hashing,
        }
    }

    /// Rebuild a registry from stored records.
    ///
    /// A repeated username keeps its first record; later ones are dropped.
    #[must_use]
    pub fn from_accounts(accounts: Vec<Account>, hashing: PasswordHashing) -> Self {
        let mut registry = Self::new(hashing);
        for account in accounts {
            if registry.find(account.username.as_str()).is_some() {
                warn!(username = %account.username, "Dropping duplicate stored account");
                continue;
            }
            registry.accounts.push(account);
        }
        registry
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new account and return the stored record.
    ///
    /// An empty password is treated as no password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is malformed.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    /// Returns `AuthError::PasswordHash` if the digest cannot be computed.
    pub fn register(
        &mut self,
        username: &str,
        password: Option<&str>,
    ) -> Result<Account, AuthError> {
        let username = Username::parse(username)?;

        if self.find(username.as_str()).is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = supplied(password)
            .map(|p| hash_password(p, self.hashing))
            .transpose()?;

        let account = Account {
            username,
            password_hash,
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check credentials and return the matching account's username.
    ///
    /// Succeeds when the account has a password and the supplied one matches,
    /// or when the account has no password and none is supplied. Every other
    /// case, including an unknown username, is the same generic error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the credentials don't match.
    pub fn authenticate(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<Username, AuthError> {
        let account = self.find(username).ok_or(AuthError::InvalidCredentials)?;

        match (&account.password_hash, supplied(password)) {
            (Some(digest), Some(password)) => verify_password(password, digest)?,
            (None, None) => {}
            _ => return Err(AuthError::InvalidCredentials),
        }

        Ok(account.username.clone())
    }

    /// Account with exactly this username.
    #[must_use]
    pub fn find(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == *username)
    }

    /// Accounts in sign-up order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Treat an empty password field as no password.
fn supplied(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str, hashing: PasswordHashing) -> Result<PasswordDigest, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = hashing.hasher()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored digest.
fn verify_password(password: &str, digest: &PasswordDigest) -> Result<(), AuthError> {
    let parsed_hash =
        PasswordHash::new(digest.as_str()).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registry() -> AccountRegistry {
        AccountRegistry::new(PasswordHashing::Minimal)
    }

    #[test]
    fn test_register_and_authenticate_with_password() {
        let mut registry = registry();
        registry.register("alice", Some("pw1")).unwrap();

        assert_eq!(
            registry.authenticate("alice", Some("pw1")).unwrap().as_str(),
            "alice"
        );
        assert_eq!(
            registry.authenticate("alice", Some("pw2")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            registry.authenticate("alice", None),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_password_is_not_stored_in_plaintext() {
        let mut registry = registry();
        let account = registry.register("alice", Some("hunter2")).unwrap();
        let digest = account.password_hash.as_ref().unwrap();
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(!digest.as_str().contains("hunter2"));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut registry = registry();
        registry.register("alice", Some("pw1")).unwrap();

        assert_eq!(
            registry.register("alice", Some("pw2")).unwrap_err(),
            AuthError::UsernameTaken
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.authenticate("alice", Some("pw1")).is_ok());
        assert!(registry.authenticate("alice", Some("pw2")).is_err());
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let mut registry = registry();
        registry.register("alice", None).unwrap();
        assert!(registry.register("Alice", None).is_ok());
        assert_eq!(registry.len(), 2);
        assert!(registry.authenticate("ALICE", None).is_err());
    }

    #[test]
    fn test_passwordless_account() {
        let mut registry = registry();
        registry.register("bob", None).unwrap();

        assert!(registry.authenticate("bob", None).is_ok());
        assert!(registry.authenticate("bob", Some("")).is_ok());
        assert_eq!(
            registry.authenticate("bob", Some("guess")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_empty_password_registers_passwordless() {
        let mut registry = registry();
        let account = registry.register("carol", Some("")).unwrap();
        assert!(!account.has_password());
    }

    #[test]
    fn test_unknown_user_is_generic_error() {
        let registry = registry();
        assert_eq!(
            registry.authenticate("bob", None),
            Err(AuthError::InvalidCredentials)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_username() {
        let mut registry = registry();
        assert!(matches!(
            registry.register("   ", None),
            Err(AuthError::InvalidUsername(_))
        ));
    }

    #[test]
    fn test_from_accounts_drops_duplicates() {
        let mut source = registry();
        source.register("alice", Some("pw1")).unwrap();
        let mut records = source.accounts().to_vec();
        records.push(Account {
            username: Username::parse("alice").unwrap(),
            password_hash: None,
        });

        let registry = AccountRegistry::from_accounts(records, PasswordHashing::Minimal);
        assert_eq!(registry.len(), 1);
        assert!(registry.find("alice").unwrap().has_password());
    }

    #[test]
    fn test_password_hashing_from_str() {
        assert_eq!(
            "minimal".parse::<PasswordHashing>(),
            Ok(PasswordHashing::Minimal)
        );
        assert_eq!(
            "standard".parse::<PasswordHashing>(),
            Ok(PasswordHashing::Standard)
        );
        assert!("fast".parse::<PasswordHashing>().is_err());
    }
}
