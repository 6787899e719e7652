//! `PostgreSQL` repository implementation for directory storage.

use super::{
    models::{ProfileRow, RoleRow, SectorRow},
    schema::{profiles, sectors, user_roles},
};
use crate::directory::{
    domain::{
        PersistedProfileData, Profile, ProfileName, Role, Sector, SectorId, SectorName, UserId,
    },
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed directory repository.
#[derive(Debug, Clone)]
pub struct PostgresDirectoryRepository {
    pool: DirectoryPgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDirectoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> DirectoryRepositoryResult<()> {
        let row = to_profile_row(profile);
        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .on_conflict(profiles::user_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_profile(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .find(user_id.into_inner())
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_profiles(&self) -> DirectoryRepositoryResult<Vec<Profile>> {
        self.run_blocking(move |connection| {
            let rows = profiles::table
                .order(profiles::name.asc())
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }

    async fn store_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()> {
        let row = to_sector_row(sector);
        self.run_blocking(move |connection| {
            diesel::insert_into(sectors::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_sector_write_error(err, &row.name))?;
            Ok(())
        })
        .await
    }

    async fn update_sector(&self, sector: &Sector) -> DirectoryRepositoryResult<()> {
        let id = sector.id();
        let row = to_sector_row(sector);
        self.run_blocking(move |connection| {
            let updated = diesel::update(sectors::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(|err| map_sector_write_error(err, &row.name))?;
            if updated == 0 {
                return Err(DirectoryRepositoryError::SectorNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_sector(&self, id: SectorId) -> DirectoryRepositoryResult<()> {
        let uuid = id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::update(profiles::table.filter(profiles::sector_id.eq(uuid)))
                        .set(profiles::sector_id.eq(None::<uuid::Uuid>))
                        .execute(tx)?;
                    let deleted = diesel::delete(sectors::table.find(uuid)).execute(tx)?;
                    if deleted == 0 {
                        return Err(DieselError::NotFound);
                    }
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => DirectoryRepositoryError::SectorNotFound(id),
                    other => DirectoryRepositoryError::persistence(other),
                })
        })
        .await
    }

    async fn find_sector(&self, id: SectorId) -> DirectoryRepositoryResult<Option<Sector>> {
        self.run_blocking(move |connection| {
            let row = sectors::table
                .find(id.into_inner())
                .select(SectorRow::as_select())
                .first::<SectorRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_sector).transpose()
        })
        .await
    }

    async fn list_sectors(&self) -> DirectoryRepositoryResult<Vec<Sector>> {
        self.run_blocking(move |connection| {
            let rows = sectors::table
                .order(sectors::name.asc())
                .select(SectorRow::as_select())
                .load::<SectorRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_sector).collect()
        })
        .await
    }

    async fn set_role(&self, user_id: UserId, role: Role) -> DirectoryRepositoryResult<()> {
        let row = RoleRow {
            user_id: user_id.into_inner(),
            role: role.as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(user_roles::table)
                .values(&row)
                .on_conflict(user_roles::user_id)
                .do_update()
                .set(user_roles::role.eq(excluded(user_roles::role)))
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_role(&self, user_id: UserId) -> DirectoryRepositoryResult<Option<Role>> {
        self.run_blocking(move |connection| {
            let role = user_roles::table
                .find(user_id.into_inner())
                .select(user_roles::role)
                .first::<String>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            role.map(|value| Role::try_from(value.as_str()))
                .transpose()
                .map_err(DirectoryRepositoryError::persistence)
        })
        .await
    }

    async fn list_roles(&self) -> DirectoryRepositoryResult<Vec<(UserId, Role)>> {
        self.run_blocking(move |connection| {
            let rows = user_roles::table
                .order(user_roles::user_id.asc())
                .select(RoleRow::as_select())
                .load::<RoleRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let role = Role::try_from(row.role.as_str())
                        .map_err(DirectoryRepositoryError::persistence)?;
                    Ok((UserId::from_uuid(row.user_id), role))
                })
                .collect()
        })
        .await
    }

    async fn count_roles(&self) -> DirectoryRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = user_roles::table
                .count()
                .get_result::<i64>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            u64::try_from(count).map_err(DirectoryRepositoryError::persistence)
        })
        .await
    }

    async fn purge_user(&self, user_id: UserId) -> DirectoryRepositoryResult<()> {
        let uuid = user_id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(user_roles::table.find(uuid)).execute(tx)?;
                    diesel::delete(profiles::table.find(uuid)).execute(tx)?;
                    Ok(())
                })
                .map_err(DirectoryRepositoryError::persistence)
        })
        .await
    }
}

fn map_sector_write_error(err: DieselError, name: &str) -> DirectoryRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DirectoryRepositoryError::DuplicateSectorName(name.to_owned())
        }
        other => DirectoryRepositoryError::persistence(other),
    }
}

fn to_profile_row(profile: &Profile) -> ProfileRow {
    ProfileRow {
        user_id: profile.user_id().into_inner(),
        name: profile.name().as_str().to_owned(),
        avatar_url: profile.avatar_url().map(str::to_owned),
        sector_id: profile.sector_id().map(SectorId::into_inner),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn row_to_profile(row: ProfileRow) -> DirectoryRepositoryResult<Profile> {
    let name = ProfileName::new(row.name).map_err(DirectoryRepositoryError::persistence)?;
    Ok(Profile::from_persisted(PersistedProfileData {
        user_id: UserId::from_uuid(row.user_id),
        name,
        avatar_url: row.avatar_url,
        sector_id: row.sector_id.map(SectorId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_sector_row(sector: &Sector) -> SectorRow {
    SectorRow {
        id: sector.id().into_inner(),
        name: sector.name().as_str().to_owned(),
        created_at: sector.created_at(),
        updated_at: sector.updated_at(),
    }
}

fn row_to_sector(row: SectorRow) -> DirectoryRepositoryResult<Sector> {
    let name = SectorName::new(row.name).map_err(DirectoryRepositoryError::persistence)?;
    Ok(Sector::from_persisted(
        SectorId::from_uuid(row.id),
        name,
        row.created_at,
        row.updated_at,
    ))
}
