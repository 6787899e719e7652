//! Port for the external authentication service.

use crate::directory::domain::{NewIdentity, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// External authentication service holding credentials and issuing tokens.
///
/// The directory never stores passwords; it only references identities by
/// [`UserId`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to the identity it was issued for.
    ///
    /// Returns `None` for unknown, expired, or malformed tokens.
    async fn resolve_bearer(&self, token: &str) -> IdentityResult<Option<UserId>>;

    /// Creates a confirmed identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses the
    /// request, e.g. for an e-mail already registered or a weak password.
    async fn create_identity(&self, identity: &NewIdentity) -> IdentityResult<UserId>;

    /// Deletes an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NotFound`] when the identity does not exist.
    async fn delete_identity(&self, user_id: UserId) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The identity does not exist.
    #[error("identity not found: {0}")]
    NotFound(UserId),

    /// The provider could not be reached or answered unexpectedly.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a transport or decoding failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
