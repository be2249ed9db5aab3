//! Authentication core.
//!
//! Password hashing, session token signing and verification, the credential
//! store seam, and the service tying them together for the HTTP layer.

pub mod jwt;
pub mod password;
pub mod service;
pub mod store;

pub use jwt::SessionTokenCodec;
pub use password::{HashedPassword, PasswordHasher};
pub use service::AuthenticationService;
pub use store::{CredentialStore, MemoryCredentialStore};

use thiserror::Error;

/// Convenience alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors.
///
/// Token failures stay distinct here so callers can log them apart; the HTTP
/// layer collapses them into a single unauthorized response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Identifier already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Insufficient access: role '{required}' required")]
    InsufficientAccess { required: String },

    #[error("Credential store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True for the token validation failures.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken(_) | AuthError::InvalidSignature | AuthError::ExpiredToken
        )
    }
}
