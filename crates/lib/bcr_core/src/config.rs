//! Auth configuration, loaded once at startup and immutable afterwards.

use std::fmt;

use chrono::Duration;

use crate::auth::password::{DEFAULT_BCRYPT_COST, PasswordHasher};
use crate::auth::{AuthError, AuthResult};

/// Env var holding the token signing secret.
pub const SIGNING_KEY_VAR: &str = "JWT_SIGNATURE_KEY";
/// Env var overriding the bcrypt cost factor.
pub const BCRYPT_COST_VAR: &str = "BCRYPT_COST";
/// Env var setting the token lifetime in seconds.
pub const TOKEN_TTL_VAR: &str = "TOKEN_TTL_SECS";

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// HMAC signing secret.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> AuthResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::Config("signing secret must not be empty".into()));
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Process-wide auth settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub signing_secret: SigningSecret,
    pub bcrypt_cost: u32,
    /// Token lifetime. `None` issues tokens without an `exp` claim.
    pub token_ttl: Option<Duration>,
}

impl AuthConfig {
    /// Config with the given secret and default cost, no expiry.
    pub fn new(secret: impl Into<String>) -> AuthResult<Self> {
        Ok(Self {
            signing_secret: SigningSecret::new(secret)?,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            token_ttl: None,
        })
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> AuthResult<Self> {
        PasswordHasher::new(cost)?;
        self.bcrypt_cost = cost;
        Ok(self)
    }

    /// Set the token lifetime; must be positive and at most ten years.
    pub fn with_token_ttl(mut self, ttl: Duration) -> AuthResult<Self> {
        let secs = ttl.num_seconds();
        if secs <= 0 || secs > MAX_TOKEN_TTL_SECS {
            return Err(AuthError::Config(format!(
                "token lifetime must be between 1 and {MAX_TOKEN_TTL_SECS} seconds, got {secs}"
            )));
        }
        self.token_ttl = Some(ttl);
        Ok(self)
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable            | Default                      |
    /// |---------------------|------------------------------|
    /// | `JWT_SIGNATURE_KEY` | required                     |
    /// | `BCRYPT_COST`       | `10`                         |
    /// | `TOKEN_TTL_SECS`    | unset (tokens never expire)  |
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AuthConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SIGNING_KEY_VAR)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::Config(format!("{SIGNING_KEY_VAR} is not set")))?;
        let mut config = Self::new(secret)?;

        if let Some(raw) = lookup(BCRYPT_COST_VAR) {
            let cost = raw
                .trim()
                .parse::<u32>()
                .map_err(|e| AuthError::Config(format!("{BCRYPT_COST_VAR}: {e}")))?;
            config = config.with_bcrypt_cost(cost)?;
        }

        if let Some(raw) = lookup(TOKEN_TTL_VAR) {
            let secs = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| AuthError::Config(format!("{TOKEN_TTL_VAR}: {e}")))?;
            let ttl = Duration::try_seconds(secs).ok_or_else(|| {
                AuthError::Config(format!("{TOKEN_TTL_VAR} out of range: {secs}"))
            })?;
            config = config.with_token_ttl(ttl)?;
        }

        Ok(config)
    }
}
