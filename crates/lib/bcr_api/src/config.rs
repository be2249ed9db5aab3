//! API server configuration.

use bcr_core::auth::AuthResult;
use bcr_core::config::AuthConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// Signing key, bcrypt cost and token lifetime.
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable    | Default          |
    /// |-------------|------------------|
    /// | `BIND_ADDR` | `127.0.0.1:8000` |
    ///
    /// plus the auth variables read by [`AuthConfig::from_env`]. A missing
    /// signing key is an error.
    pub fn from_env() -> AuthResult<Self> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            auth: AuthConfig::from_env()?,
        })
    }
}
