//! Sector administration.

use crate::directory::{
    domain::{DirectoryDomainError, Sector, SectorId, SectorName},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::session::SessionContext;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by [`SectorService`].
#[derive(Debug, Error)]
pub enum SectorServiceError {
    /// Only administrators may change sectors.
    #[error("user is not allowed to manage sectors")]
    Forbidden,
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Persistence failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
}

/// Result type for sector administration.
pub type SectorServiceResult<T> = Result<T, SectorServiceError>;

/// Creates, renames, deletes, and lists sectors.
#[derive(Clone)]
pub struct SectorService<D, C>
where
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> SectorService<D, C>
where
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sector service.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    /// Creates a sector.
    ///
    /// # Errors
    ///
    /// Returns [`SectorServiceError::Forbidden`] for non-administrators,
    /// [`DirectoryDomainError::EmptySectorName`] for blank names, or
    /// [`DirectoryRepositoryError::DuplicateSectorName`] when the name is
    /// taken.
    pub async fn create(
        &self,
        session: &SessionContext,
        name: impl Into<String>,
    ) -> SectorServiceResult<Sector> {
        require_admin(session)?;
        let sector = Sector::new(SectorName::new(name)?, &*self.clock);
        self.directory.store_sector(&sector).await?;
        info!(sector_id = %sector.id(), name = sector.name().as_str(), "sector created");
        Ok(sector)
    }

    /// Renames a sector.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::create`] or
    /// [`DirectoryRepositoryError::SectorNotFound`].
    pub async fn rename(
        &self,
        session: &SessionContext,
        id: SectorId,
        name: impl Into<String>,
    ) -> SectorServiceResult<Sector> {
        require_admin(session)?;
        let new_name = SectorName::new(name)?;
        let mut sector = self
            .directory
            .find_sector(id)
            .await?
            .ok_or(DirectoryRepositoryError::SectorNotFound(id))?;
        sector.rename(new_name, &*self.clock);
        self.directory.update_sector(&sector).await?;
        info!(sector_id = %id, name = sector.name().as_str(), "sector renamed");
        Ok(sector)
    }

    /// Deletes a sector; its members keep their profiles without a sector.
    ///
    /// # Errors
    ///
    /// Returns [`SectorServiceError::Forbidden`] for non-administrators or
    /// [`DirectoryRepositoryError::SectorNotFound`].
    pub async fn delete(&self, session: &SessionContext, id: SectorId) -> SectorServiceResult<()> {
        require_admin(session)?;
        self.directory.delete_sector(id).await?;
        info!(sector_id = %id, "sector deleted");
        Ok(())
    }

    /// Lists every sector ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`SectorServiceError::Repository`] when lookup fails.
    pub async fn list(&self, session: &SessionContext) -> SectorServiceResult<Vec<Sector>> {
        debug!(user_id = %session.user_id(), "listing sectors");
        Ok(self.directory.list_sectors().await?)
    }
}

fn require_admin(session: &SessionContext) -> SectorServiceResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        warn!(user_id = %session.user_id(), "sector change rejected");
        Err(SectorServiceError::Forbidden)
    }
}
