//! Runs the hourly task reminder for one identity until interrupted.
//!
//! The identity is taken from `ITINERARY_REMINDER_USER_ID`. Notifications are
//! written to the log; the last notified hour is kept in
//! `ITINERARY_MARKER_DIR` so restarts do not repeat a reminder within the
//! same hour. Assignments written by other processes are picked up by
//! polling the task store every `ITINERARY_ASSIGNMENT_POLL_SECS`.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use itinerary::config::{AppConfig, ConfigError, REMINDER_USER_ID};
use itinerary::directory::adapters::{
    gotrue::GoTrueIdentityProvider, postgres::PostgresDirectoryRepository,
};
use itinerary::notification::{
    adapters::{FileMarkerStore, TracingNotifier},
    ports::Permission,
    services::NotificationGate,
};
use itinerary::session::SessionLoader;
use itinerary::task::{
    adapters::postgres::PostgresTaskRepository,
    services::{AssignmentWatcher, TaskLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    itinerary::telemetry::init()?;
    let config = AppConfig::from_env()?;
    let user_id = config
        .reminder_user_id
        .ok_or(ConfigError::Missing(REMINDER_USER_ID))?;
    let (auth_url, service_key) = config.identity_credentials()?;

    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder().max_size(config.pool_size).build(manager)?;
    let clock = Arc::new(DefaultClock);
    let loader = SessionLoader::new(
        Arc::new(PostgresDirectoryRepository::new(pool.clone())),
        Arc::new(GoTrueIdentityProvider::new(auth_url, service_key)),
    );
    let session = loader.load(user_id).await?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
    ));
    let watcher = AssignmentWatcher::new(repository, tasks.events().clone(), user_id)
        .with_poll_interval(config.assignment_poll_interval);
    let gate = NotificationGate::new(
        Arc::clone(&tasks),
        Arc::new(TracingNotifier::new(Permission::Granted)),
        Arc::new(FileMarkerStore::open(&config.marker_dir)?),
        clock,
        session,
    )
    .with_settings(config.gate);

    let shutdown_rx = itinerary::shutdown::on_ctrl_c();

    info!(user_id = %user_id, "itinerary reminder started");
    let events = tasks.events().subscribe();
    let watching = tokio::spawn(watcher.run(shutdown_rx.clone()));
    gate.run(events, shutdown_rx).await;
    watching.abort();
    Ok(())
}
