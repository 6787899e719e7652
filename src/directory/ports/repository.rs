//! Repository port for profiles, sectors, and role assignments.

use crate::directory::domain::{Profile, Role, Sector, SectorId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Directory persistence contract.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Inserts or replaces the profile of an identity.
    async fn upsert_profile(&self, profile: &Profile) -> DirectoryRepositoryResult<()>;

    /// Finds the profile of an identity.
    async fn find_profile(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Profile>>;

    /// Lists every profile ordered by name.
    async fn list_profiles(&self) -> DirectoryRepositoryResult<Vec<Profile>>;

    /// Stores a new sector.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateSectorName`] when another
    /// sector already uses the name.
    async fn store_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()>;

    /// Persists a renamed sector.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::SectorNotFound`] when the sector
    /// does not exist.
    async fn update_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()>;

    /// Deletes a sector and clears it from every profile.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::SectorNotFound`] when the sector
    /// does not exist.
    async fn delete_sector(&self, id: SectorId) -> DirectoryRepositoryResult<()>;

    /// Finds a sector by identifier.
    async fn find_sector(&self, id: SectorId) -> DirectoryRepositoryResult<Option<Sector>>;

    /// Lists every sector ordered by name.
    async fn list_sectors(&self) -> DirectoryRepositoryResult<Vec<Sector>>;

    /// Assigns `role` to an identity, replacing any previous role.
    async fn set_role(&self, user_id: UserId, role: Role) -> DirectoryRepositoryResult<()>;

    /// Returns the role of an identity, if any.
    async fn find_role(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Role>>;

    /// Lists every role assignment.
    async fn list_roles(&self) -> DirectoryRepositoryResult<Vec<(UserId, Role)>>;

    /// Counts role assignments. Zero means the system is not bootstrapped.
    async fn count_roles(&self) -> DirectoryRepositoryResult<u64>;

    /// Removes the role and profile of an identity.
    async fn purge_user(&self, user_id: UserId) -> DirectoryRepositoryResult<()>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// The sector was not found.
    #[error("sector not found: {0}")]
    SectorNotFound(SectorId),

    /// Another sector already uses the name.
    #[error("sector name already in use: {0}")]
    DuplicateSectorName(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
