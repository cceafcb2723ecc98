use axum::extract::{Multipart, State};
use axum::Json;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::info;

use crate::assets::AssetPayload;
use crate::errors::AppError;
use crate::intake::coordinator::{self, IntakeOutcome, Submission};
use crate::state::AppState;

/// POST /api/v1/applications
///
/// Accepted and discarded submissions answer identically; the submitter
/// never learns which one happened. Only validation, upload, and
/// persistence failures are visible.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let submission = parse_submission(multipart).await?;
    let outcome = coordinator::submit(
        state.repository.as_ref(),
        state.assets.as_ref(),
        submission,
    )
    .await?;

    if let IntakeOutcome::Accepted { id } = outcome {
        info!("Accepted application {id}");
    }
    Ok(Json(json!({ "success": true })))
}

/// Collects the multipart fields into a `Submission`. Missing required
/// fields, a missing resume, and a malformed date of birth are all hard
/// validation errors; nothing downstream runs on bad input.
async fn parse_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut full_name = None;
    let mut email = None;
    let mut phone = None;
    let mut design_category = None;
    let mut dob = None;
    let mut portfolio_link = None;
    let mut answer_collection = None;
    let mut answer_project = None;
    let mut answer_inspiration = None;
    let mut resume: Option<AssetPayload> = None;
    let mut portfolio_images: Vec<AssetPayload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "resume" => resume = Some(read_file(field).await?),
            "portfolioImages" => portfolio_images.push(read_file(field).await?),
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable field \"{name}\": {e}")))?;
                match name.as_str() {
                    "fullName" => full_name = Some(value),
                    "email" => email = Some(value),
                    "phone" => phone = Some(value),
                    "designCategory" => design_category = Some(value),
                    "dob" => dob = Some(value),
                    "portfolioLink" => portfolio_link = Some(value),
                    "answerCollection" => answer_collection = Some(value),
                    "answerProject" => answer_project = Some(value),
                    "answerInspiration" => answer_inspiration = Some(value),
                    _ => {} // unknown fields are ignored
                }
            }
        }
    }

    let resume = match resume {
        Some(file) if !file.bytes.is_empty() => file,
        _ => return Err(AppError::Validation("Missing required file \"resume\"".to_string())),
    };

    Ok(Submission {
        full_name: require_field(full_name, "fullName")?,
        email: require_field(email, "email")?,
        phone: require_field(phone, "phone")?,
        design_category: require_field(design_category, "designCategory")?,
        date_of_birth: parse_dob(&require_field(dob, "dob")?)?,
        portfolio_link: portfolio_link.filter(|link| !link.trim().is_empty()),
        answer_collection: require_field(answer_collection, "answerCollection")?,
        answer_project: require_field(answer_project, "answerProject")?,
        answer_inspiration: require_field(answer_inspiration, "answerInspiration")?,
        resume,
        portfolio_images,
    })
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<AssetPayload, AppError> {
    let name = field.name().unwrap_or("file").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Unreadable file \"{name}\": {e}")))?;
    Ok(AssetPayload { bytes, content_type })
}

fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "Missing required field \"{name}\""
        ))),
    }
}

/// Malformed or missing dates of birth are hard input errors, never
/// silently treated as eligible or ineligible.
fn parse_dob(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Validation("Field \"dob\" must be a date in YYYY-MM-DD format".to_string())
    })
}
