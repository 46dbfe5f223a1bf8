//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] tanish_arts_core::UsernameError),

    /// Username already registered (exact, case-sensitive match).
    #[error("username already taken")]
    UsernameTaken,

    /// Invalid credentials (wrong password, missing password, or no such user).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
