//! Review lifecycle of a stored application: disposition transitions and
//! score/label consistency. Mutations arrive as a partial update, are
//! validated here, and are applied to one record as a single atomic patch.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Disposition of an application record. `Pending` is the intake default.
/// Any status may move to any other; re-application and correction of an
/// evaluator mistake are both valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Selected,
    Rejected,
}

impl ReviewStatus {
    pub fn parse(value: &str) -> Option<ReviewStatus> {
        match value {
            "pending" => Some(ReviewStatus::Pending),
            "selected" => Some(ReviewStatus::Selected),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Selected => "selected",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Categorical banding of a numeric suitability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Strong,
    Good,
    Average,
    Weak,
}

impl ScoreLabel {
    /// Total over the full 0–100 domain: 85 and up is Strong, 70–84 Good,
    /// 50–69 Average, everything below 50 Weak.
    pub fn from_score(score: i32) -> ScoreLabel {
        match score {
            s if s >= 85 => ScoreLabel::Strong,
            s if s >= 70 => ScoreLabel::Good,
            s if s >= 50 => ScoreLabel::Average,
            _ => ScoreLabel::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Strong => "Strong",
            ScoreLabel::Good => "Good",
            ScoreLabel::Average => "Average",
            ScoreLabel::Weak => "Weak",
        }
    }
}

/// A score override paired with the label recomputed from it. The two are
/// written together so a stored score is never out of step with its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOverride {
    pub score: i32,
    pub label: ScoreLabel,
}

/// A validated mutation, applied to one record as a single atomic update.
/// Disposition and score are independent axes; setting one never touches
/// the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPatch {
    pub status: Option<ReviewStatus>,
    pub score: Option<ScoreOverride>,
}

/// Partial update accepted by the record mutation interface. Any field
/// outside `status`/`score` is rejected at deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewUpdate {
    pub status: Option<String>,
    pub score: Option<i32>,
}

impl ReviewUpdate {
    /// Validates the update without touching the record. Out-of-domain
    /// statuses and out-of-range scores are rejected per-field.
    pub fn into_patch(self) -> Result<ReviewPatch, AppError> {
        let status = match self.status.as_deref() {
            Some(raw) => Some(ReviewStatus::parse(raw).ok_or_else(|| {
                AppError::StateTransition(format!(
                    "status must be one of pending, selected, rejected (got \"{raw}\")"
                ))
            })?),
            None => None,
        };

        let score = match self.score {
            Some(s) if !(0..=100).contains(&s) => {
                return Err(AppError::StateTransition(format!(
                    "score must be an integer between 0 and 100 (got {s})"
                )));
            }
            Some(s) => Some(ScoreOverride {
                score: s,
                label: ScoreLabel::from_score(s),
            }),
            None => None,
        };

        if status.is_none() && score.is_none() {
            return Err(AppError::Validation(
                "update must set status and/or score".to_string(),
            ));
        }

        Ok(ReviewPatch { status, score })
    }
}
