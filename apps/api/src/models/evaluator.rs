use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated evaluator as reported by the identity provider. The
/// name is for display only; all evaluators hold equal privilege over all
/// records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorIdentity {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

/// A provider session returned on login. The token authorizes subsequent
/// review-surface calls as a bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub evaluator: EvaluatorIdentity,
}
