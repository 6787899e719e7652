//! In-memory repository for profiles, sectors, and roles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{Profile, Role, Sector, SectorId, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory directory repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectoryRepository {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    profiles: HashMap<UserId, Profile>,
    sectors: HashMap<SectorId, Sector>,
    roles: HashMap<UserId, Role>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> DirectoryRepositoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn name_taken(state: &DirectoryState, sector: &Sector) -> bool {
    state
        .sectors
        .values()
        .any(|other| other.id() != sector.id() && other.name() == sector.name())
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        state.profiles.insert(profile.user_id(), profile.clone());
        Ok(())
    }

    async fn find_profile(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Profile>> {
        let state = self.read()?;
        Ok(state.profiles.get(&user_id).cloned())
    }

    async fn list_profiles(&self) -> DirectoryRepositoryResult<Vec<Profile>> {
        let state = self.read()?;
        let mut profiles: Vec<Profile> = state.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(profiles)
    }

    async fn store_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if name_taken(&state, sector) {
            return Err(DirectoryRepositoryError::DuplicateSectorName(
                sector.name().as_str().to_owned(),
            ));
        }
        state.sectors.insert(sector.id(), sector.clone());
        Ok(())
    }

    async fn update_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.sectors.contains_key(&sector.id()) {
            return Err(DirectoryRepositoryError::SectorNotFound(sector.id()));
        }
        if name_taken(&state, sector) {
            return Err(DirectoryRepositoryError::DuplicateSectorName(
                sector.name().as_str().to_owned(),
            ));
        }
        state.sectors.insert(sector.id(), sector.clone());
        Ok(())
    }

    async fn delete_sector(&self, id: SectorId) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .sectors
            .remove(&id)
            .ok_or(DirectoryRepositoryError::SectorNotFound(id))?;
        for profile in state.profiles.values_mut() {
            if profile.sector_id() == Some(id) {
                profile.clear_sector();
            }
        }
        Ok(())
    }

    async fn find_sector(&self, id: SectorId) -> DirectoryRepositoryResult<Option<Sector>> {
        let state = self.read()?;
        Ok(state.sectors.get(&id).cloned())
    }

    async fn list_sectors(&self) -> DirectoryRepositoryResult<Vec<Sector>> {
        let state = self.read()?;
        let mut sectors: Vec<Sector> = state.sectors.values().cloned().collect();
        sectors.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(sectors)
    }

    async fn set_role(&self, user_id: UserId, role: Role) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        state.roles.insert(user_id, role);
        Ok(())
    }

    async fn find_role(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Role>> {
        let state = self.read()?;
        Ok(state.roles.get(&user_id).copied())
    }

    async fn list_roles(&self) -> DirectoryRepositoryResult<Vec<(UserId, Role)>> {
        let state = self.read()?;
        let mut roles: Vec<(UserId, Role)> =
            state.roles.iter().map(|(user_id, role)| (*user_id, *role)).collect();
        roles.sort_by_key(|(user_id, _)| *user_id);
        Ok(roles)
    }

    async fn count_roles(&self) -> DirectoryRepositoryResult<u64> {
        let state = self.read()?;
        u64::try_from(state.roles.len()).map_err(DirectoryRepositoryError::persistence)
    }

    async fn purge_user(&self, user_id: UserId) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        state.roles.remove(&user_id);
        state.profiles.remove(&user_id);
        Ok(())
    }
}
