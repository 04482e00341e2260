//! Bucket provider trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Low-level bucket API
///
/// One method per provider call the reconciler needs. Implementations
/// return the provider's raw outcome; folding failures into booleans is
/// the job of [`crate::StateReader`], not of this trait.
#[async_trait]
pub trait BucketApi: Send + Sync {
    /// Returns the provider name (e.g., "aws-s3")
    fn name(&self) -> &str;

    /// Cheap existence probe (HEAD bucket)
    async fn head_bucket(&self, bucket: &str) -> Result<()>;

    /// Create the bucket with a private ACL
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Algorithms of the configured default-encryption rules
    async fn get_encryption(&self, bucket: &str) -> Result<Vec<String>>;

    /// Set default server-side encryption without a customer-managed key
    async fn put_encryption(&self, bucket: &str, algorithm: &str) -> Result<()>;

    /// Versioning status; `None` when versioning was never configured
    async fn get_versioning(&self, bucket: &str) -> Result<Option<FacetStatus>>;

    async fn put_versioning(&self, bucket: &str, status: FacetStatus) -> Result<()>;

    /// Transfer acceleration status; `None` when never configured
    async fn get_acceleration(&self, bucket: &str) -> Result<Option<FacetStatus>>;

    async fn put_acceleration(&self, bucket: &str, status: FacetStatus) -> Result<()>;

    /// Overwrite the bucket policy with a JSON policy document
    async fn put_policy(&self, bucket: &str, policy: &str) -> Result<()>;

    /// Block until the bucket exists, using the provider's own waiter policy
    async fn wait_until_exists(&self, bucket: &str) -> Result<()>;
}

/// Status of a toggleable facet (versioning, acceleration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FacetStatus {
    Enabled,
    Suspended,
}

impl FacetStatus {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            FacetStatus::Enabled
        } else {
            FacetStatus::Suspended
        }
    }

    pub fn is_enabled(self) -> bool {
        self == FacetStatus::Enabled
    }
}

impl std::fmt::Display for FacetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetStatus::Enabled => write!(f, "Enabled"),
            FacetStatus::Suspended => write!(f, "Suspended"),
        }
    }
}
