//! Password hashing via bcrypt.

use std::fmt;

use super::{AuthError, AuthResult};

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Lowest cost bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt ignores input past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A bcrypt hash in modular crypt format (`$2b$<cost>$<salt+digest>`).
///
/// Deliberately not `Serialize` and not comparable: the only way to check a
/// plaintext against it is [`PasswordHasher::verify`].
#[derive(Clone)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a hash loaded from storage. Structure is checked lazily on verify.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The encoded hash, for persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Salted, adaptive password hasher with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Build a hasher, rejecting costs bcrypt cannot run.
    pub fn new(cost: u32) -> AuthResult<Self> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(AuthError::Config(format!(
                "bcrypt cost must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> AuthResult<HashedPassword> {
        if plaintext.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".into()));
        }
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::InvalidInput(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        bcrypt::hash(plaintext, self.cost)
            .map(HashedPassword)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    /// Verify a password against a bcrypt hash.
    ///
    /// A mismatch is `Ok(false)`. A hash that bcrypt cannot parse is
    /// [`AuthError::MalformedHash`]. Plaintext longer than bcrypt's input limit
    /// never matches.
    pub fn verify(&self, plaintext: &str, hashed: &HashedPassword) -> AuthResult<bool> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(plaintext, hashed.as_str()).map_err(|_| AuthError::MalformedHash)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}
