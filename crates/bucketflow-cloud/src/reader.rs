//! Remote state reader
//!
//! Every query is folded into a plain boolean. A failed query reads as
//! "not configured"; the folded error is still logged at debug level so it
//! stays observable without changing control flow.

use crate::action::Facet;
use crate::error::Result;
use crate::provider::{BucketApi, FacetStatus};

/// Boolean view over a bucket's remote configuration
pub struct StateReader<'a> {
    api: &'a dyn BucketApi,
}

impl<'a> StateReader<'a> {
    pub fn new(api: &'a dyn BucketApi) -> Self {
        Self { api }
    }

    /// True iff the existence probe succeeds (not-found and access-denied read as false)
    pub async fn exists(&self, bucket: &str) -> bool {
        probe(Facet::Existence, bucket, self.api.head_bucket(bucket).await).is_some()
    }

    /// True iff the encryption query succeeds with at least one rule
    pub async fn has_encryption(&self, bucket: &str) -> bool {
        probe(Facet::Encryption, bucket, self.api.get_encryption(bucket).await)
            .is_some_and(|rules| !rules.is_empty())
    }

    /// True iff versioning is currently `Enabled`
    pub async fn has_versioning(&self, bucket: &str) -> bool {
        let status = probe(Facet::Versioning, bucket, self.api.get_versioning(bucket).await);
        matches!(status, Some(Some(FacetStatus::Enabled)))
    }

    /// True iff transfer acceleration is currently `Enabled`
    pub async fn has_acceleration(&self, bucket: &str) -> bool {
        let status = probe(
            Facet::Acceleration,
            bucket,
            self.api.get_acceleration(bucket).await,
        );
        matches!(status, Some(Some(FacetStatus::Enabled)))
    }
}

/// Result-to-option adapter for read-side queries
fn probe<T>(facet: Facet, bucket: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(%facet, bucket, error = %e, "Probe failed, treating as not configured");
            None
        }
    }
}
