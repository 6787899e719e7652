//! `create-user` and `delete-user` handlers.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
};
use mockable::Clock;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

use super::FunctionError;
use crate::directory::{
    domain::{Role, SectorId, UserId},
    ports::{DirectoryRepository, IdentityProvider},
    services::{CreateUserRequest, UserAdminService},
};
use crate::task::ports::TaskRepository;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Deserialize)]
struct CreateUserBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    sector_id: Option<SectorId>,
}

#[derive(Debug, Default, Deserialize)]
struct DeleteUserBody {
    #[serde(default)]
    user_id: Option<UserId>,
}

/// Extracts the bearer token from the `Authorization` header.
///
/// A header without the `Bearer ` prefix is taken as the raw token. Blank
/// values count as absent.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

fn parse_body<B: DeserializeOwned>(body: &Bytes) -> Result<B, FunctionError> {
    serde_json::from_slice(body)
        .map_err(|err| FunctionError::bad_request(format!("JSON inválido: {err}")))
}

pub(super) async fn create_user<D, T, I, C>(
    State(service): State<Arc<UserAdminService<D, T, I, C>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, FunctionError>
where
    D: DirectoryRepository + 'static,
    T: TaskRepository + 'static,
    I: IdentityProvider + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload: CreateUserBody = parse_body(&body)?;
    let request = CreateUserRequest {
        email: payload.email,
        password: payload.password,
        name: payload.name,
        role: payload.role,
        sector_id: payload.sector_id,
    };
    let user_id = service.create_user(bearer_token(&headers), request).await?;
    Ok(Json(json!({ "success": true, "user_id": user_id })))
}

pub(super) async fn delete_user<D, T, I, C>(
    State(service): State<Arc<UserAdminService<D, T, I, C>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, FunctionError>
where
    D: DirectoryRepository + 'static,
    T: TaskRepository + 'static,
    I: IdentityProvider + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload: DeleteUserBody = if body.iter().all(u8::is_ascii_whitespace) {
        DeleteUserBody::default()
    } else {
        parse_body(&body)?
    };
    service
        .delete_user(bearer_token(&headers), payload.user_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
