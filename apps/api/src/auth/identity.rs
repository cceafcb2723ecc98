//! Identity provider client, the single point of entry for all calls to
//! the external auth service. No other module may talk to it directly;
//! this design only consumes pass/fail plus identity, never its internals.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::evaluator::{EvaluatorIdentity, Session};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity request rejected: {0}")]
    Rejected(String),

    #[error("identity provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Credential verification and identity extraction, held in `AppState` as
/// `Arc<dyn IdentityProvider>` so tests can swap in a static provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<EvaluatorIdentity, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Resolves a bearer token to the evaluator it belongs to. `Ok(None)`
    /// means the token is missing, expired, or revoked: a denial, not a
    /// provider failure.
    async fn current_user(&self, token: &str) -> Result<Option<EvaluatorIdentity>, IdentityError>;

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: String,
    user_metadata: Option<serde_json::Value>,
}

impl ProviderUser {
    fn into_identity(self) -> EvaluatorIdentity {
        let full_name = self
            .user_metadata
            .as_ref()
            .and_then(|meta| meta.get("full_name"))
            .and_then(|value| value.as_str())
            .map(String::from);
        EvaluatorIdentity {
            id: self.id,
            email: self.email,
            full_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
}

pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ProviderErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.msg.or(parsed.error_description))
        .unwrap_or(body)
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<EvaluatorIdentity, IdentityError> {
        let response = self
            .client
            .post(self.url("/signup"))
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            return Err(IdentityError::Rejected(error_message(response).await));
        }
        if !status.is_success() {
            let message = error_message(response).await;
            warn!("Identity sign-up failed with {status}: {message}");
            return Err(IdentityError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ProviderUser>().await?.into_identity())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let response = self
            .client
            .post(self.url("/token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            warn!("Identity sign-in failed with {status}: {message}");
            return Err(IdentityError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let token = response.json::<TokenResponse>().await?;
        Ok(Session {
            access_token: token.access_token,
            evaluator: token.user.into_identity(),
        })
    }

    async fn current_user(&self, token: &str) -> Result<Option<EvaluatorIdentity>, IdentityError> {
        let response = self
            .client
            .get(self.url("/user"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            warn!("Identity lookup failed with {status}: {message}");
            return Err(IdentityError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(response.json::<ProviderUser>().await?.into_identity()))
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.url("/logout"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        // An already-expired token is as signed-out as it gets.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        let message = error_message(response).await;
        warn!("Identity sign-out failed with {status}: {message}");
        Err(IdentityError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}
