pub mod handlers;
pub mod identity;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::state::AppState;

/// Access gate for the review surface. Every record read and mutation
/// passes through here first; unauthenticated callers get a denial, never
/// data. The resolved evaluator is attached as a request extension for
/// display use downstream.
pub async fn require_evaluator(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or(AppError::Unauthorized)?
        .to_owned();

    let evaluator = state
        .identity
        .current_user(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(evaluator);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
