use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::assets::{upload_all, AssetPayload, AssetStore};
use crate::errors::AppError;
use crate::intake::eligibility::is_eligible;
use crate::models::application::NewApplication;
use crate::repository::ApplicationRepository;

/// A structurally valid submission, consumed exactly once by `submit`.
#[derive(Debug, Clone)]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub design_category: String,
    pub date_of_birth: NaiveDate,
    pub portfolio_link: Option<String>,
    pub answer_collection: String,
    pub answer_project: String,
    pub answer_inspiration: String,
    pub resume: AssetPayload,
    pub portfolio_images: Vec<AssetPayload>,
}

/// Result of one intake attempt. `Discarded` must be presented to the
/// submitter exactly like `Accepted`; failures surface as `AppError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Accepted { id: Uuid },
    Discarded,
}

/// Runs one submission through filter → upload → persist.
///
/// The eligibility check comes first so an ineligible submission uploads
/// nothing and writes nothing. Uploads are all-or-nothing; a record is
/// created only once every locator is in hand. A persistence failure
/// leaves the already-uploaded objects orphaned rather than attempting a
/// compensating delete. No retries here; the submitter resubmits.
pub async fn submit(
    repository: &dyn ApplicationRepository,
    assets: &dyn AssetStore,
    submission: Submission,
) -> Result<IntakeOutcome, AppError> {
    let today = Utc::now().date_naive();
    if !is_eligible(submission.date_of_birth, today) {
        debug!("Discarding ineligible submission");
        return Ok(IntakeOutcome::Discarded);
    }

    let (resume_location, portfolio_locations) =
        upload_all(assets, &submission.resume, &submission.portfolio_images).await?;

    let record = repository
        .create(NewApplication {
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            design_category: submission.design_category,
            date_of_birth: submission.date_of_birth,
            portfolio_link: submission.portfolio_link,
            answer_collection: submission.answer_collection,
            answer_project: submission.answer_project,
            answer_inspiration: submission.answer_inspiration,
            resume_location,
            portfolio_locations,
        })
        .await?;

    Ok(IntakeOutcome::Accepted { id: record.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dob_with_age, payload, FakeAssetStore, InMemoryRepository};

    fn submission(date_of_birth: NaiveDate) -> Submission {
        Submission {
            full_name: "Ayla Vance".to_string(),
            email: "ayla@example.com".to_string(),
            phone: "+14155550170".to_string(),
            design_category: "Womenswear".to_string(),
            date_of_birth,
            portfolio_link: Some("https://portfolio.example.com/ayla".to_string()),
            answer_collection: "A capsule collection built around raw denim.".to_string(),
            answer_project: "Draped a full look from a single bolt.".to_string(),
            answer_inspiration: "Workwear archives.".to_string(),
            resume: payload("resume-1"),
            portfolio_images: vec![payload("img-a"), payload("img-b")],
        }
    }

    #[tokio::test]
    async fn eligible_submission_creates_one_pending_record() {
        let repository = InMemoryRepository::default();
        let assets = FakeAssetStore::new();

        let outcome = submit(&repository, &assets, submission(dob_with_age(24)))
            .await
            .unwrap();

        assert!(matches!(outcome, IntakeOutcome::Accepted { .. }));
        assert_eq!(repository.len(), 1);

        let row = repository.first().unwrap();
        assert_eq!(row.status, "pending");
        assert_eq!(row.score, None);
        assert_eq!(row.label, None);
        assert!(row.resume_location.ends_with("resume-1"));
        let suffixes: Vec<_> = row
            .portfolio_locations
            .iter()
            .map(|l| l.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(suffixes, ["img-a", "img-b"]);
    }

    #[tokio::test]
    async fn ineligible_submission_is_discarded_without_side_effects() {
        let repository = InMemoryRepository::default();
        let assets = FakeAssetStore::new();

        let outcome = submit(&repository, &assets, submission(dob_with_age(35)))
            .await
            .unwrap();

        assert_eq!(outcome, IntakeOutcome::Discarded);
        assert_eq!(repository.len(), 0);
        assert!(assets.completed().is_empty(), "nothing may be uploaded");
    }

    #[tokio::test]
    async fn failed_upload_persists_no_record() {
        let repository = InMemoryRepository::default();
        let assets = FakeAssetStore::new();

        let mut sub = submission(dob_with_age(24));
        sub.portfolio_images = vec![payload("img-a"), payload("fail-b")];

        let result = submit(&repository, &assets, sub).await;

        assert!(matches!(result, Err(AppError::Upload(_))));
        assert_eq!(repository.len(), 0);
    }
}
