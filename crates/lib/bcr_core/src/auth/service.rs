//! Authentication service: register, login, authenticate, authorize.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};

use super::jwt::SessionTokenCodec;
use super::password::{HashedPassword, PasswordHasher};
use super::store::CredentialStore;
use super::{AuthError, AuthResult};
use crate::config::AuthConfig;
use crate::models::auth::{NewCredential, Profile, PublicUserView, Role, SessionClaims};

/// Plaintext hashed once at startup so unknown-identifier logins still pay
/// for a full bcrypt verify.
const TIMING_DUMMY_PASSWORD: &str = "bcr-timing-equaliser";

/// Orchestrates the credential store, password hasher and token codec.
pub struct AuthenticationService<S: CredentialStore + ?Sized> {
    store: Arc<S>,
    hasher: PasswordHasher,
    codec: SessionTokenCodec,
    token_ttl: Option<Duration>,
    dummy_hash: HashedPassword,
}

impl<S: CredentialStore + ?Sized> AuthenticationService<S> {
    pub fn new(store: Arc<S>, config: &AuthConfig) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(config.bcrypt_cost)?;
        let dummy_hash = hasher.hash(TIMING_DUMMY_PASSWORD)?;
        Ok(Self {
            store,
            hasher,
            codec: SessionTokenCodec::new(&config.signing_secret),
            token_ttl: config.token_ttl,
            dummy_hash,
        })
    }

    /// Register a new account with the `CUSTOMER` role.
    pub async fn register(
        &self,
        identifier: &str,
        password: &str,
        profile: Profile,
    ) -> AuthResult<PublicUserView> {
        let email = normalize_identifier(identifier);
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidInput("a valid email is required".into()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".into()));
        }
        if profile.name.trim().is_empty() {
            return Err(AuthError::InvalidInput("name must not be empty".into()));
        }

        if self.store.find_by_identifier(&email).await?.is_some() {
            return Err(AuthError::DuplicateIdentifier(email));
        }

        let password_hash = self.hasher.hash(password)?;
        let credential = self
            .store
            .create(NewCredential {
                email,
                profile,
                role: Role::customer(),
                password_hash,
            })
            .await?;

        info!(user_id = credential.id, email = %credential.email, "user registered");
        Ok(credential.public_view())
    }

    /// Authenticate with email + password and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, identifier: &str, password: &str) -> AuthResult<String> {
        let email = normalize_identifier(identifier);
        let Some(credential) = self.store.find_by_identifier(&email).await? else {
            let _ = self.hasher.verify(password, &self.dummy_hash);
            warn!(email = %email, "failed login attempt");
            return Err(AuthError::InvalidCredentials);
        };

        let verified = self
            .hasher
            .verify(password, &credential.password_hash)
            .inspect_err(|_| error!(user_id = credential.id, "stored password hash is malformed"))?;
        if !verified {
            warn!(email = %email, "failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let claims = SessionClaims::issue(&credential, Utc::now(), self.token_ttl)?;
        let token = self.codec.encode(&claims)?;
        info!(user_id = credential.id, role = %credential.role.name, "session issued");
        Ok(token)
    }

    /// Validate a session token and return its claims.
    pub fn authenticate(&self, token: &str) -> AuthResult<SessionClaims> {
        self.codec
            .decode(token)
            .inspect_err(|e| debug!(error = %e, "session token rejected"))
    }

    /// Validate a session token and require the given role.
    pub fn authorize(&self, token: &str, required_role: &str) -> AuthResult<SessionClaims> {
        let claims = self.authenticate(token)?;
        if !claims.has_role(required_role) {
            debug!(
                user_id = claims.subject_id,
                role = %claims.role.name,
                required_role,
                "insufficient access"
            );
            return Err(AuthError::InsufficientAccess {
                required: required_role.to_string(),
            });
        }
        Ok(claims)
    }

    /// Public view of the identity carried by `claims`.
    pub fn whoami(&self, claims: &SessionClaims) -> PublicUserView {
        claims.public_view()
    }
}

fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}
