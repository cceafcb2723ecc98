use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationSummary};
use crate::review::ReviewUpdate;
use crate::state::AppState;

/// GET /api/v1/admin/applications
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationSummary>>, AppError> {
    Ok(Json(state.repository.list_summaries().await?))
}

/// GET /api/v1/admin/applications/:id
pub async fn handle_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let row = state
        .repository
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(row))
}

/// PATCH /api/v1/admin/applications/:id
///
/// Accepts `{status}` and/or `{score}`; anything else in the payload is
/// rejected before validation. An invalid update leaves the record
/// untouched.
pub async fn handle_review_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ReviewUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    let patch = update.into_patch()?;
    let updated = state
        .repository
        .apply_review(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(updated))
}
