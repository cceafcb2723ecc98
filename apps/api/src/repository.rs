use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::application::{ApplicationRow, ApplicationSummary, NewApplication};
use crate::review::ReviewPatch;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            other => RepositoryError::Unavailable(other.to_string()),
        }
    }
}

/// Record store abstraction so intake and review can be exercised without a
/// live database. The Postgres implementation owns all SQL; identifiers and
/// creation timestamps are assigned by the store, never by callers.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Creates one record with `status = pending` and null score/label.
    async fn create(&self, new: NewApplication) -> Result<ApplicationRow, RepositoryError>;

    /// Summary projection of every record, newest first.
    async fn list_summaries(&self) -> Result<Vec<ApplicationSummary>, RepositoryError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<ApplicationRow>, RepositoryError>;

    /// Applies a validated review patch as a single atomic update and
    /// returns the updated row. `Ok(None)` when the record does not exist.
    async fn apply_review(
        &self,
        id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<Option<ApplicationRow>, RepositoryError>;
}

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Connects a pool and wraps it. Schema lives in `migrations/`.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create(&self, new: NewApplication) -> Result<ApplicationRow, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications
                (full_name, email, phone, design_category, date_of_birth, portfolio_link,
                 answer_collection, answer_project, answer_inspiration,
                 resume_location, portfolio_locations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.design_category)
        .bind(new.date_of_birth)
        .bind(&new.portfolio_link)
        .bind(&new.answer_collection)
        .bind(&new.answer_project)
        .bind(&new.answer_inspiration)
        .bind(&new.resume_location)
        .bind(&new.portfolio_locations)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_summaries(&self) -> Result<Vec<ApplicationSummary>, RepositoryError> {
        Ok(sqlx::query_as::<_, ApplicationSummary>(
            r#"
            SELECT id, created_at, full_name, email, design_category, score, label, status
            FROM applications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ApplicationRow>, RepositoryError> {
        Ok(
            sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn apply_review(
        &self,
        id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<Option<ApplicationRow>, RepositoryError> {
        // One UPDATE covers status and/or score+label; untouched columns
        // keep their value via COALESCE.
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE applications
            SET status = COALESCE($2, status),
                score  = COALESCE($3, score),
                label  = COALESCE($4, label)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.status.as_ref().map(|s| s.as_str()))
        .bind(patch.score.as_ref().map(|o| o.score))
        .bind(patch.score.as_ref().map(|o| o.label.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
