//! Shared test helpers for in-memory integration tests.

use chrono::{Duration, Utc};
use itinerary::directory::{
    adapters::memory::{InMemoryDirectoryRepository, InMemoryIdentityProvider},
    domain::{Role, UserId},
    services::{CreateUserRequest, UserAdminService},
};
use itinerary::session::SessionContext;
use itinerary::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskKind},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Task service over in-memory storage.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// User administration service over in-memory adapters.
pub type TestAdminService = UserAdminService<
    InMemoryDirectoryRepository,
    InMemoryTaskRepository,
    InMemoryIdentityProvider,
    DefaultClock,
>;

/// Provides a fresh task service for each test.
#[fixture]
pub fn task_service() -> TestTaskService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// In-memory adapters shared by the user administration tests.
pub struct AdminHarness {
    /// Directory storage.
    pub directory: Arc<InMemoryDirectoryRepository>,
    /// Task storage.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Identity provider.
    pub identity: Arc<InMemoryIdentityProvider>,
    /// Service under test.
    pub service: TestAdminService,
}

/// Provides empty adapters and a service over them.
#[fixture]
pub fn admin_harness() -> AdminHarness {
    let directory = Arc::new(InMemoryDirectoryRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let service = UserAdminService::new(
        Arc::clone(&directory),
        Arc::clone(&tasks),
        Arc::clone(&identity),
        Arc::new(DefaultClock),
    );
    AdminHarness {
        directory,
        tasks,
        identity,
        service,
    }
}

impl AdminHarness {
    /// Creates the first administrator and returns their id and token.
    ///
    /// # Errors
    ///
    /// Returns an error if creation or token issuance fails.
    pub async fn bootstrap_admin(&self) -> Result<(UserId, String), eyre::Report> {
        let admin = self
            .service
            .create_user(None, user_request("admin@example.com", Some(Role::Admin)))
            .await?;
        let token = self.identity.issue_token(admin)?;
        Ok((admin, token))
    }
}

/// Builds a user creation request with a valid password.
#[must_use]
pub fn user_request(email: &str, role: Option<Role>) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_owned(),
        password: "segredo123".to_owned(),
        name: None,
        role,
        sector_id: None,
    }
}

/// Builds a session for a fresh identity with `role`.
#[must_use]
pub fn session(role: Option<Role>) -> SessionContext {
    SessionContext::new(UserId::new(), None, role)
}

/// Creates a maintenance task for `client` assigned to `assignees`.
///
/// # Errors
///
/// Returns an error if the service rejects the request.
pub async fn create_task(
    service: &TestTaskService,
    manager: &SessionContext,
    client: &str,
    assignees: &[UserId],
) -> Result<Task, eyre::Report> {
    let request = CreateTaskRequest::new(TaskKind::Maintenance, client)
        .with_deadline(Utc::now() + Duration::days(1))
        .with_assignees(assignees.iter().copied());
    Ok(service.create_task(manager, request).await?)
}
