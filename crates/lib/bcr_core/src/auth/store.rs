//! Credential store seam and an in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{AuthError, AuthResult};
use crate::models::auth::{Credential, NewCredential};

/// Lookup and creation of user credentials, keyed by email.
///
/// The auth core never issues raw queries; these two calls are all it needs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a credential by its unique identifier.
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Credential>>;

    /// Persist a new credential, failing with
    /// [`AuthError::DuplicateIdentifier`] if the identifier is taken.
    async fn create(&self, credential: NewCredential) -> AuthResult<Credential>;
}

/// In-memory credential store.
///
/// Uniqueness of the identifier is enforced atomically per key, so two
/// concurrent registrations of the same email cannot both succeed.
#[derive(Debug, Default, Clone)]
pub struct MemoryCredentialStore {
    by_email: Arc<DashMap<String, Credential>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Credential>> {
        Ok(self.by_email.get(identifier).map(|r| r.value().clone()))
    }

    async fn create(&self, credential: NewCredential) -> AuthResult<Credential> {
        match self.by_email.entry(credential.email.clone()) {
            Entry::Occupied(_) => Err(AuthError::DuplicateIdentifier(credential.email)),
            Entry::Vacant(slot) => {
                let row = Credential {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    email: credential.email,
                    name: credential.profile.name,
                    image: credential.profile.image,
                    role: credential.role,
                    password_hash: credential.password_hash,
                };
                slot.insert(row.clone());
                Ok(row)
            }
        }
    }
}
