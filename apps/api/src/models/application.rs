use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted application record. Identifier and creation timestamp are
/// assigned by the record store; `score` and `label` stay null until the
/// external scoring step or an evaluator override sets them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub design_category: String,
    pub date_of_birth: NaiveDate,
    pub portfolio_link: Option<String>,
    pub answer_collection: String,
    pub answer_project: String,
    pub answer_inspiration: String,
    pub resume_location: String,
    /// Locators in upload submission order, not completion order.
    pub portfolio_locations: Vec<String>,
    pub score: Option<i32>,
    pub label: Option<String>,
    pub status: String,
}

/// List-view projection: identity and evaluation columns only. Free-text
/// answers and asset locators are detail-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub design_category: String,
    pub score: Option<i32>,
    pub label: Option<String>,
    pub status: String,
}

/// Field values for creating a record at intake. Everything else on
/// `ApplicationRow` is store-assigned or defaulted.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub design_category: String,
    pub date_of_birth: NaiveDate,
    pub portfolio_link: Option<String>,
    pub answer_collection: String,
    pub answer_project: String,
    pub answer_inspiration: String,
    pub resume_location: String,
    pub portfolio_locations: Vec<String>,
}
