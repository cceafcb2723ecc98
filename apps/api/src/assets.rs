use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use futures_util::future::{try_join, try_join_all};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Error)]
#[error("asset upload failed: {0}")]
pub struct UploadError(pub String);

/// Category-scoped namespace an asset is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Resume,
    PortfolioImage,
}

impl AssetKind {
    pub fn namespace(&self) -> &'static str {
        match self {
            AssetKind::Resume => "applications/resumes",
            AssetKind::PortfolioImage => "applications/portfolios",
        }
    }
}

/// One uploaded file pulled out of the multipart request.
#[derive(Debug, Clone)]
pub struct AssetPayload {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Binary object store collaborator. `put` stores one blob under the
/// kind's namespace and returns a stable, publicly resolvable locator.
/// No retries here; a failure surfaces immediately to the caller.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn put(&self, kind: AssetKind, asset: &AssetPayload) -> Result<String, UploadError>;
}

/// Uploads the resume and every portfolio image concurrently and waits for
/// all of them, so total latency is bounded by the slowest upload rather
/// than the sum. Image locators come back in submission order no matter
/// which upload finishes first. One failure fails the whole batch; no
/// partial locator list is ever returned.
pub async fn upload_all(
    store: &dyn AssetStore,
    resume: &AssetPayload,
    images: &[AssetPayload],
) -> Result<(String, Vec<String>), UploadError> {
    let resume_upload = store.put(AssetKind::Resume, resume);
    let image_uploads = try_join_all(
        images
            .iter()
            .map(|image| store.put(AssetKind::PortfolioImage, image)),
    );
    try_join(resume_upload, image_uploads).await
}

/// S3/MinIO-backed asset store. Objects get server-generated UUID names so
/// submitter-supplied filenames never reach the store.
pub struct S3AssetStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3AssetStore {
    pub fn new(client: aws_sdk_s3::Client, config: &Config) -> Self {
        Self {
            client,
            bucket: config.s3_bucket.clone(),
            public_base_url: config.s3_public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn put(&self, kind: AssetKind, asset: &AssetPayload) -> Result<String, UploadError> {
        let key = format!("{}/{}", kind.namespace(), Uuid::new_v4());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(asset.bytes.clone()))
            .content_type(&asset.content_type)
            .send()
            .await
            .map_err(|e| UploadError(e.to_string()))?;

        info!("Uploaded asset to s3://{}/{}", self.bucket, key);

        Ok(format!("{}/{}/{}", self.public_base_url, self.bucket, key))
    }
}
