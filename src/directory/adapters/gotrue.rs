//! Identity provider backed by a GoTrue-compatible authentication service.
//!
//! Token resolution calls `GET {base}/user` with the caller's bearer token.
//! Identity management uses the admin API (`{base}/admin/users`)
//! authenticated with the service-role key.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::directory::{
    domain::{NewIdentity, UserId},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// HTTP client for the GoTrue user and admin endpoints.
#[derive(Debug, Clone)]
pub struct GoTrueIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: UserMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
}

impl GoTrueIdentityProvider {
    /// Creates a provider for the service rooted at `base_url`, e.g.
    /// `https://project.example/auth/v1`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, service_role_key)
    }

    /// Creates a provider reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        let raw: String = base_url.into();
        Self {
            client,
            base_url: raw.trim_end_matches('/').to_owned(),
            service_role_key: service_role_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn resolve_bearer(&self, token: &str) -> IdentityResult<Option<UserId>> {
        let response = self
            .client
            .get(self.url("/user"))
            .header("apikey", &self.service_role_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(IdentityError::unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(%status, "bearer token rejected by identity provider");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(error_message(status, &body)));
        }
        let user = response
            .json::<UserResponse>()
            .await
            .map_err(IdentityError::unavailable)?;
        Ok(Some(UserId::from_uuid(user.id)))
    }

    async fn create_identity(&self, identity: &NewIdentity) -> IdentityResult<UserId> {
        let body = CreateUserBody {
            email: identity.email().as_str(),
            password: identity.password(),
            email_confirm: true,
            user_metadata: UserMetadata {
                name: identity.display_name(),
            },
        };
        let response = self
            .client
            .post(self.url("/admin/users"))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&body)
            .send()
            .await
            .map_err(IdentityError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(error_message(status, &text)));
        }
        let user = response
            .json::<UserResponse>()
            .await
            .map_err(IdentityError::unavailable)?;
        Ok(UserId::from_uuid(user.id))
    }

    async fn delete_identity(&self, user_id: UserId) -> IdentityResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/admin/users/{user_id}")))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .map_err(IdentityError::unavailable)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(IdentityError::NotFound(user_id));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(error_message(status, &text)));
        }
        Ok(())
    }
}

/// Extracts the human-readable message from a GoTrue error body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("identity provider returned {status}"))
}
