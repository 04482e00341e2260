//! Remote state mutator
//!
//! Thin write-side wrapper over [`BucketApi`]. Every failure is returned to
//! the caller; nothing is swallowed here.

use crate::error::Result;
use crate::provider::{BucketApi, FacetStatus};

pub struct StateMutator<'a> {
    api: &'a dyn BucketApi,
}

impl<'a> StateMutator<'a> {
    pub fn new(api: &'a dyn BucketApi) -> Self {
        Self { api }
    }

    /// Create the bucket with a private ACL
    pub async fn create(&self, bucket: &str) -> Result<()> {
        tracing::debug!(bucket, "Creating bucket");
        self.api.create_bucket(bucket).await
    }

    pub async fn apply_encryption(&self, bucket: &str, algorithm: &str) -> Result<()> {
        tracing::debug!(bucket, algorithm, "Applying default encryption");
        self.api.put_encryption(bucket, algorithm).await
    }

    pub async fn set_versioning(&self, bucket: &str, enabled: bool) -> Result<()> {
        let status = FacetStatus::from_enabled(enabled);
        tracing::debug!(bucket, %status, "Setting versioning");
        self.api.put_versioning(bucket, status).await
    }

    pub async fn set_acceleration(&self, bucket: &str, enabled: bool) -> Result<()> {
        let status = FacetStatus::from_enabled(enabled);
        tracing::debug!(bucket, %status, "Setting transfer acceleration");
        self.api.put_acceleration(bucket, status).await
    }

    /// Serialize the policy to JSON and overwrite the bucket policy
    pub async fn apply_policy(&self, bucket: &str, policy: &serde_json::Value) -> Result<()> {
        let document = serde_json::to_string(policy)?;
        tracing::debug!(bucket, bytes = document.len(), "Overwriting bucket policy");
        self.api.put_policy(bucket, &document).await
    }
}
