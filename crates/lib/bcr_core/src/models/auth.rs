//! Authentication domain models.
//!
//! `Credential` is internal to the auth core; `PublicUserView` and
//! `SessionClaims` are what leaves it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::password::HashedPassword;
use crate::auth::{AuthError, AuthResult};

/// Role snapshot. Copied by value into tokens at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

impl Role {
    pub const ADMIN: &'static str = "ADMIN";
    pub const CUSTOMER: &'static str = "CUSTOMER";

    /// Seeded administrator role.
    pub fn admin() -> Self {
        Self {
            id: 1,
            name: Self::ADMIN.to_string(),
        }
    }

    /// Seeded customer role, assigned on registration.
    pub fn customer() -> Self {
        Self {
            id: 2,
            name: Self::CUSTOMER.to_string(),
        }
    }
}

/// Profile fields supplied at registration.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: String,
    pub image: Option<String>,
}

/// Record handed to the store on registration.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub email: String,
    pub profile: Profile,
    pub role: Role,
    pub password_hash: HashedPassword,
}

/// Stored user with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub role: Role,
    pub password_hash: HashedPassword,
}

impl Credential {
    pub fn public_view(&self) -> PublicUserView {
        PublicUserView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
        }
    }
}

/// User as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

/// Claims embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    #[serde(rename = "id")]
    pub subject_id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: Role,
    /// Issued at (unix timestamp).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (unix timestamp). Absent means the token does not expire.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl SessionClaims {
    /// Snapshot a credential into claims issued at `now`.
    ///
    /// Fails if `now + ttl` is not representable.
    pub fn issue(
        credential: &Credential,
        now: DateTime<Utc>,
        ttl: Option<Duration>,
    ) -> AuthResult<Self> {
        let expires_at = match ttl {
            Some(ttl) => Some(
                now.checked_add_signed(ttl)
                    .ok_or_else(|| AuthError::Internal("token expiry out of range".into()))?
                    .timestamp(),
            ),
            None => None,
        };
        Ok(Self {
            subject_id: credential.id,
            name: credential.name.clone(),
            email: credential.email.clone(),
            image: credential.image.clone(),
            role: credential.role.clone(),
            issued_at: now.timestamp(),
            expires_at,
        })
    }

    pub fn public_view(&self) -> PublicUserView {
        PublicUserView {
            id: self.subject_id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
        }
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.role.name == role_name
    }
}
