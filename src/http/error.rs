//! JSON error responses for the privileged functions.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::directory::{
    ports::{DirectoryRepositoryError, IdentityError},
    services::UserAdminError,
};

/// An error rendered as `{"error": "<message>"}` with an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionError {
    status: StatusCode,
    message: String,
}

impl FunctionError {
    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the message placed in the response body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Maps a user administration error to its HTTP status.
#[must_use]
pub const fn status_for(err: &UserAdminError) -> StatusCode {
    match err {
        UserAdminError::Unauthorized => StatusCode::UNAUTHORIZED,
        UserAdminError::Forbidden => StatusCode::FORBIDDEN,
        UserAdminError::MissingUserId
        | UserAdminError::SelfDeletion
        | UserAdminError::UserNotFound(_)
        | UserAdminError::Domain(_)
        | UserAdminError::Identity(IdentityError::Rejected(_) | IdentityError::NotFound(_))
        | UserAdminError::Directory(
            DirectoryRepositoryError::SectorNotFound(_)
            | DirectoryRepositoryError::DuplicateSectorName(_),
        ) => StatusCode::BAD_REQUEST,
        UserAdminError::Identity(IdentityError::Unavailable(_))
        | UserAdminError::Directory(DirectoryRepositoryError::Persistence(_))
        | UserAdminError::Tasks(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<UserAdminError> for FunctionError {
    fn from(err: UserAdminError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "privileged function failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
