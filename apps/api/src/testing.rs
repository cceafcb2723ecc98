//! Test doubles for the three external collaborators, plus small fixture
//! helpers. Compiled only for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::assets::{AssetKind, AssetPayload, AssetStore, UploadError};
use crate::auth::identity::{IdentityError, IdentityProvider};
use crate::config::Config;
use crate::models::application::{ApplicationRow, ApplicationSummary, NewApplication};
use crate::models::evaluator::{EvaluatorIdentity, Session};
use crate::repository::{ApplicationRepository, RepositoryError};
use crate::review::ReviewPatch;
use crate::state::AppState;

/// A date of birth `years` (or `years + 1`) whole years before today.
/// June 15 avoids leap-day edge cases; callers pick ages far enough from
/// the eligibility cutoff that the one-year slack cannot flip the result.
pub fn dob_with_age(years: i32) -> chrono::NaiveDate {
    use chrono::Datelike;
    let today = Utc::now().date_naive();
    chrono::NaiveDate::from_ymd_opt(today.year() - years - 1, 6, 15).unwrap()
}

pub fn payload(label: &str) -> AssetPayload {
    AssetPayload {
        bytes: Bytes::from(label.as_bytes().to_vec()),
        content_type: "application/octet-stream".to_string(),
    }
}

/// In-memory record store with the same create/list/fetch/patch semantics
/// as the Postgres implementation.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<ApplicationRow>>,
}

impl InMemoryRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn first(&self) -> Option<ApplicationRow> {
        self.rows.lock().unwrap().first().cloned()
    }

    pub fn seed(&self, row: ApplicationRow) -> Uuid {
        let id = row.id;
        self.rows.lock().unwrap().push(row);
        id
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryRepository {
    async fn create(&self, new: NewApplication) -> Result<ApplicationRow, RepositoryError> {
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            design_category: new.design_category,
            date_of_birth: new.date_of_birth,
            portfolio_link: new.portfolio_link,
            answer_collection: new.answer_collection,
            answer_project: new.answer_project,
            answer_inspiration: new.answer_inspiration,
            resume_location: new.resume_location,
            portfolio_locations: new.portfolio_locations,
            score: None,
            label: None,
            status: "pending".to_string(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_summaries(&self) -> Result<Vec<ApplicationSummary>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .map(|row| ApplicationSummary {
                id: row.id,
                created_at: row.created_at,
                full_name: row.full_name,
                email: row.email,
                design_category: row.design_category,
                score: row.score,
                label: row.label,
                status: row.status,
            })
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ApplicationRow>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn apply_review(
        &self,
        id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<Option<ApplicationRow>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(status) = &patch.status {
            row.status = status.as_str().to_string();
        }
        if let Some(over) = &patch.score {
            row.score = Some(over.score);
            row.label = Some(over.label.as_str().to_string());
        }
        Ok(Some(row.clone()))
    }
}

/// Asset store double. Locators echo the payload contents so tests can
/// correlate results back to inputs; per-label delays scramble completion
/// order; payloads whose contents start with "fail" error out.
pub struct FakeAssetStore {
    delays: HashMap<String, Duration>,
    completed: Mutex<Vec<String>>,
}

impl FakeAssetStore {
    pub fn new() -> Self {
        Self {
            delays: HashMap::new(),
            completed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, label: &str, delay: Duration) -> Self {
        self.delays.insert(label.to_string(), delay);
        self
    }

    /// Labels of successful uploads, in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn put(&self, kind: AssetKind, asset: &AssetPayload) -> Result<String, UploadError> {
        let label = String::from_utf8_lossy(&asset.bytes).to_string();
        if label.starts_with("fail") {
            return Err(UploadError(format!("scripted failure for {label}")));
        }
        if let Some(delay) = self.delays.get(&label).copied() {
            tokio::time::sleep(delay).await;
        }
        self.completed.lock().unwrap().push(label.clone());
        Ok(format!("https://assets.test/{}/{}", kind.namespace(), label))
    }
}

/// Identity double: one evaluator, one fixed password, one valid token.
pub struct StaticIdentityProvider {
    pub token: String,
    pub password: String,
    pub evaluator: EvaluatorIdentity,
}

impl Default for StaticIdentityProvider {
    fn default() -> Self {
        Self {
            token: "evaluator-token".to_string(),
            password: "correct-password".to_string(),
            evaluator: EvaluatorIdentity {
                id: Uuid::new_v4(),
                email: "reviewer@example.com".to_string(),
                full_name: Some("Test Reviewer".to_string()),
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        _password: &str,
    ) -> Result<EvaluatorIdentity, IdentityError> {
        Ok(EvaluatorIdentity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: Some(full_name.to_string()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        if email == self.evaluator.email && password == self.password {
            Ok(Session {
                access_token: self.token.clone(),
                evaluator: self.evaluator.clone(),
            })
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn current_user(&self, token: &str) -> Result<Option<EvaluatorIdentity>, IdentityError> {
        if token == self.token {
            Ok(Some(self.evaluator.clone()))
        } else {
            Ok(None)
        }
    }

    async fn sign_out(&self, _token: &str) -> Result<(), IdentityError> {
        Ok(())
    }
}

pub fn seeded_row() -> ApplicationRow {
    ApplicationRow {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        full_name: "Mara Quinn".to_string(),
        email: "mara@example.com".to_string(),
        phone: "+14155550184".to_string(),
        design_category: "Accessories".to_string(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(2002, 4, 9).unwrap(),
        portfolio_link: None,
        answer_collection: "Leatherwork informed by bookbinding.".to_string(),
        answer_project: "Hand-stitched a full bag line.".to_string(),
        answer_inspiration: "Archival hardware catalogs.".to_string(),
        resume_location: "https://assets.test/applications/resumes/seed".to_string(),
        portfolio_locations: vec!["https://assets.test/applications/portfolios/seed".to_string()],
        score: None,
        label: None,
        status: "pending".to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        s3_bucket: "unused".to_string(),
        s3_endpoint: "http://unused".to_string(),
        s3_public_url: "http://unused".to_string(),
        aws_access_key_id: "unused".to_string(),
        aws_secret_access_key: "unused".to_string(),
        identity_url: "http://unused".to_string(),
        signup_access_code: "open-sesame".to_string(),
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn test_state(
    repository: Arc<InMemoryRepository>,
    assets: Arc<FakeAssetStore>,
    identity: Arc<StaticIdentityProvider>,
) -> AppState {
    AppState {
        repository,
        assets,
        identity,
        config: test_config(),
    }
}
