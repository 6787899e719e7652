//! In-memory identity provider for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::directory::{
    domain::{EmailAddress, NewIdentity, UserId},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Identity provider keeping identities and issued tokens in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<IdentityState>>,
}

#[derive(Debug, Default)]
struct IdentityState {
    identities: HashMap<UserId, EmailAddress>,
    tokens: HashMap<String, UserId>,
}

impl InMemoryIdentityProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a bearer token for an existing identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NotFound`] when the identity does not exist.
    pub fn issue_token(&self, user_id: UserId) -> IdentityResult<String> {
        let mut state = self.write()?;
        if !state.identities.contains_key(&user_id) {
            return Err(IdentityError::NotFound(user_id));
        }
        let token = Uuid::new_v4().simple().to_string();
        state.tokens.insert(token.clone(), user_id);
        Ok(token)
    }

    /// Returns `true` when the identity exists.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] when the state lock is poisoned.
    pub fn contains(&self, user_id: UserId) -> IdentityResult<bool> {
        Ok(self.read()?.identities.contains_key(&user_id))
    }

    /// Returns the number of identities.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] when the state lock is poisoned.
    pub fn len(&self) -> IdentityResult<usize> {
        Ok(self.read()?.identities.len())
    }

    /// Returns `true` when no identity exists.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] when the state lock is poisoned.
    pub fn is_empty(&self) -> IdentityResult<bool> {
        Ok(self.read()?.identities.is_empty())
    }

    fn read(&self) -> IdentityResult<RwLockReadGuard<'_, IdentityState>> {
        self.state
            .read()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> IdentityResult<RwLockWriteGuard<'_, IdentityState>> {
        self.state
            .write()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn resolve_bearer(&self, token: &str) -> IdentityResult<Option<UserId>> {
        let state = self.read()?;
        Ok(state.tokens.get(token).copied())
    }

    async fn create_identity(&self, identity: &NewIdentity) -> IdentityResult<UserId> {
        if identity.password().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::Rejected(format!(
                "Password should be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        let mut state = self.write()?;
        if state.identities.values().any(|email| email == identity.email()) {
            return Err(IdentityError::Rejected(
                "A user with this email address has already been registered".to_owned(),
            ));
        }
        let user_id = UserId::new();
        state.identities.insert(user_id, identity.email().clone());
        Ok(user_id)
    }

    async fn delete_identity(&self, user_id: UserId) -> IdentityResult<()> {
        let mut state = self.write()?;
        state
            .identities
            .remove(&user_id)
            .ok_or(IdentityError::NotFound(user_id))?;
        state.tokens.retain(|_, owner| *owner != user_id);
        Ok(())
    }
}
