use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::evaluator::{EvaluatorIdentity, Session};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub access_code: String,
}

/// POST /api/v1/auth/signup
///
/// The access code gates evaluator account creation. It is injected
/// configuration; a mismatch is denied before any identity call is made.
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<Value>, AppError> {
    if req.access_code != state.config.signup_access_code {
        return Err(AppError::Forbidden);
    }

    state
        .identity
        .sign_up(&req.full_name, &req.email, &req.password)
        .await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    let session = state.identity.sign_in(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// POST /api/v1/auth/logout. Behind the gate, so a token is present.
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        state.identity.sign_out(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me. Returns the gate-extracted identity, display use only.
pub async fn handle_me(
    Extension(evaluator): Extension<EvaluatorIdentity>,
) -> Json<EvaluatorIdentity> {
    Json(evaluator)
}
