//! Serves the privileged `create-user` and `delete-user` functions.
//!
//! Configuration comes from the environment; see [`itinerary::config`].
//! The server shuts down gracefully on Ctrl+C.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use itinerary::config::AppConfig;
use itinerary::directory::{
    adapters::{gotrue::GoTrueIdentityProvider, postgres::PostgresDirectoryRepository},
    services::UserAdminService,
};
use itinerary::task::adapters::postgres::PostgresTaskRepository;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    itinerary::telemetry::init()?;
    let config = AppConfig::from_env()?;
    let (auth_url, service_key) = config.identity_credentials()?;

    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder().max_size(config.pool_size).build(manager)?;
    let service = UserAdminService::new(
        Arc::new(PostgresDirectoryRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(GoTrueIdentityProvider::new(auth_url, service_key)),
        Arc::new(DefaultClock),
    );
    let app = itinerary::http::router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "itinerary server listening");

    let shutdown = itinerary::shutdown::on_ctrl_c();
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown))
        .await?;
    info!("itinerary server stopped");
    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
