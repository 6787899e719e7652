//! HTTP surface for the privileged user functions.
//!
//! Routes:
//!
//! - `POST /functions/v1/create-user`
//! - `POST /functions/v1/delete-user`
//! - `GET /health`
//!
//! Both functions accept an optional `Authorization: Bearer <token>` header
//! and answer CORS pre-flight requests from any origin.

mod error;
mod functions;

pub use error::{FunctionError, status_for};
pub use functions::bearer_token;

use axum::{
    Router,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::directory::{
    ports::{DirectoryRepository, IdentityProvider},
    services::UserAdminService,
};
use crate::task::ports::TaskRepository;

/// Path of the user creation function.
pub const CREATE_USER_PATH: &str = "/functions/v1/create-user";
/// Path of the user deletion function.
pub const DELETE_USER_PATH: &str = "/functions/v1/delete-user";

/// Builds the CORS policy shared by both functions.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// Builds the router serving the privileged functions.
#[must_use]
pub fn router<D, T, I, C>(service: Arc<UserAdminService<D, T, I, C>>) -> Router
where
    D: DirectoryRepository + 'static,
    T: TaskRepository + 'static,
    I: IdentityProvider + 'static,
    C: Clock + Send + Sync + 'static,
{
    let functions = Router::new()
        .route(CREATE_USER_PATH, post(functions::create_user::<D, T, I, C>))
        .route(DELETE_USER_PATH, post(functions::delete_user::<D, T, I, C>))
        .layer(cors_layer())
        .with_state(service);

    Router::new()
        .route("/health", get(functions::health))
        .merge(functions)
        .layer(TraceLayer::new_for_http())
}
