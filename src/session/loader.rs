//! Builds and refreshes [`SessionContext`]s from directory data.

use super::SessionContext;
use crate::directory::{
    domain::UserId,
    ports::{
        DirectoryRepository, DirectoryRepositoryError, IdentityError, IdentityProvider,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Authentication lifecycle events observed by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// An identity signed in.
    SignedIn(UserId),
    /// The access token was refreshed for the same identity.
    TokenRefreshed,
    /// The current identity's profile or role changed.
    ProfileUpdated,
    /// The identity signed out.
    SignedOut,
}

/// Errors returned while loading a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// Token resolution failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Result type for session loading.
pub type SessionResult<T> = Result<T, SessionError>;

/// Loads profile and role for an identity.
#[derive(Clone)]
pub struct SessionLoader<D, I>
where
    D: DirectoryRepository,
    I: IdentityProvider,
{
    directory: Arc<D>,
    identity: Arc<I>,
}

impl<D, I> SessionLoader<D, I>
where
    D: DirectoryRepository,
    I: IdentityProvider,
{
    /// Creates a new loader.
    #[must_use]
    pub const fn new(directory: Arc<D>, identity: Arc<I>) -> Self {
        Self {
            directory,
            identity,
        }
    }

    /// Loads the session of a known identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Directory`] when lookup fails.
    pub async fn load(&self, user_id: UserId) -> SessionResult<SessionContext> {
        let profile = self.directory.find_profile(user_id).await?;
        let role = self.directory.find_role(user_id).await?;
        Ok(SessionContext::new(user_id, profile, role))
    }

    /// Resolves a bearer token and loads its session.
    ///
    /// Returns `None` for tokens the identity provider does not recognise.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the provider or directory fails.
    pub async fn from_bearer(&self, token: &str) -> SessionResult<Option<SessionContext>> {
        match self.identity.resolve_bearer(token).await? {
            Some(user_id) => Ok(Some(self.load(user_id).await?)),
            None => Ok(None),
        }
    }

    /// Computes the session following `event`.
    ///
    /// Token refreshes keep the current session untouched; profile updates
    /// reload it; sign-out clears it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Directory`] when a reload fails.
    pub async fn apply(
        &self,
        current: Option<SessionContext>,
        event: AuthEvent,
    ) -> SessionResult<Option<SessionContext>> {
        debug!(?event, "applying auth event");
        match (event, current) {
            (AuthEvent::SignedIn(user_id), _) => Ok(Some(self.load(user_id).await?)),
            (AuthEvent::ProfileUpdated, Some(session)) => {
                Ok(Some(self.load(session.user_id()).await?))
            }
            (AuthEvent::TokenRefreshed, session) => Ok(session),
            (AuthEvent::SignedOut | AuthEvent::ProfileUpdated, _) => Ok(None),
        }
    }
}
