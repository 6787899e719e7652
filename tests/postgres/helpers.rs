//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use itinerary::directory::adapters::postgres::PostgresDirectoryRepository;
use itinerary::task::adapters::postgres::PostgresTaskRepository;
use uuid::Uuid;

/// Environment variable naming the server used for these tests.
pub const TEST_DATABASE_URL: &str = "ITINERARY_TEST_DATABASE_URL";

/// SQL creating sectors, profiles, and roles.
pub const DIRECTORY_SCHEMA_SQL: &str =
    include_str!("../../migrations/2025-03-01-000000_create_directory_tables/up.sql");

/// SQL creating tasks and their child tables.
pub const TASK_SCHEMA_SQL: &str =
    include_str!("../../migrations/2025-03-01-000001_create_task_tables/up.sql");

/// Boxed error type for test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A migrated database dropped when the value goes out of scope.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL of the temporary database.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.admin_url) {
            let statement = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
            if let Err(err) = connection.batch_execute(&statement) {
                tracing::warn!(error = %err, database = %self.name, "failed to drop test database");
            }
        }
    }
}

/// Repositories over one temporary database.
pub struct PreparedRepos {
    /// Keeps the database alive for the test.
    pub database: TemporaryDatabase,
    /// Directory repository.
    pub directory: PostgresDirectoryRepository,
    /// Task repository.
    pub tasks: PostgresTaskRepository,
}

/// Creates a migrated database and repositories over it.
///
/// Returns `Ok(None)` when no test server is configured.
///
/// # Errors
///
/// Returns an error if the database cannot be created or migrated.
pub async fn prepared_repos() -> Result<Option<PreparedRepos>, BoxError> {
    let Ok(admin_url) = std::env::var(TEST_DATABASE_URL) else {
        return Ok(None);
    };
    let database = tokio::task::spawn_blocking(move || create_database(admin_url)).await??;

    let manager = ConnectionManager::<PgConnection>::new(database.url());
    let pool = Pool::builder().max_size(2).build(manager)?;
    Ok(Some(PreparedRepos {
        directory: PostgresDirectoryRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        database,
    }))
}

fn create_database(admin_url: String) -> Result<TemporaryDatabase, BoxError> {
    let name = format!("itinerary_test_{}", Uuid::new_v4().simple());
    let mut admin = PgConnection::establish(&admin_url)?;
    admin.batch_execute(&format!("CREATE DATABASE \"{name}\""))?;

    let url = database_url(&admin_url, &name)?;
    let database = TemporaryDatabase {
        admin_url,
        name,
        url,
    };
    let mut connection = PgConnection::establish(database.url())?;
    connection.batch_execute(DIRECTORY_SCHEMA_SQL)?;
    connection.batch_execute(TASK_SCHEMA_SQL)?;
    Ok(database)
}

fn database_url(admin_url: &str, name: &str) -> Result<String, BoxError> {
    let (base, query) = admin_url
        .split_once('?')
        .map_or((admin_url, None), |(head, tail)| (head, Some(tail)));
    let (server, _) = base
        .rsplit_once('/')
        .ok_or_else(|| format!("{TEST_DATABASE_URL} has no database path"))?;
    Ok(query.map_or_else(
        || format!("{server}/{name}"),
        |params| format!("{server}/{name}?{params}"),
    ))
}
