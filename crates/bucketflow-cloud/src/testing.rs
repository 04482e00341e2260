//! In-memory `BucketApi` used by the unit tests

use crate::error::{CloudError, Result};
use crate::provider::{BucketApi, FacetStatus};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct FakeBucket {
    pub encryption: Vec<String>,
    pub versioning: Option<FacetStatus>,
    pub acceleration: Option<FacetStatus>,
    pub policy: Option<String>,
}

/// Fake provider that records every call as `"operation:arg..."`
#[derive(Default)]
pub struct FakeBucketApi {
    buckets: Mutex<HashMap<String, FakeBucket>>,
    calls: Mutex<Vec<String>>,
    failing: HashSet<&'static str>,
    /// Created buckets only appear after `wait_until_exists` when set
    delayed_visibility: bool,
    pending: Mutex<HashSet<String>>,
}

impl FakeBucketApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, name: &str, configure: impl FnOnce(&mut FakeBucket)) -> Self {
        let mut bucket = FakeBucket::default();
        configure(&mut bucket);
        self.buckets
            .lock()
            .unwrap()
            .insert(name.to_string(), bucket);
        self
    }

    /// Make the named operation fail with a provider error
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn with_delayed_visibility(mut self) -> Self {
        self.delayed_visibility = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose operation name matches, e.g. `"put_versioning"`
    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .collect()
    }

    /// Mutating calls only (reads and waits filtered out)
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("put_") || c.starts_with("create_"))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn bucket(&self, name: &str) -> Option<FakeBucket> {
        self.buckets.lock().unwrap().get(name).cloned()
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> Result<()> {
        let mut entry = operation.to_string();
        for arg in args {
            entry.push(':');
            entry.push_str(arg);
        }
        self.calls.lock().unwrap().push(entry);

        if self.failing.contains(operation) {
            return Err(CloudError::provider(format!("{operation} rejected")));
        }
        Ok(())
    }

    fn with_existing<T>(&self, bucket: &str, f: impl FnOnce(&mut FakeBucket) -> T) -> Result<T> {
        let mut buckets = self.buckets.lock().unwrap();
        match buckets.get_mut(bucket) {
            Some(b) => Ok(f(b)),
            None => Err(CloudError::provider(format!("NoSuchBucket: {bucket}"))),
        }
    }
}

#[async_trait]
impl BucketApi for FakeBucketApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn head_bucket(&self, bucket: &str) -> Result<()> {
        self.record("head_bucket", &[bucket])?;
        self.with_existing(bucket, |_| ())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.record("create_bucket", &[bucket])?;
        if self.buckets.lock().unwrap().contains_key(bucket) {
            return Err(CloudError::provider("BucketAlreadyOwnedByYou"));
        }
        if self.delayed_visibility {
            self.pending.lock().unwrap().insert(bucket.to_string());
        } else {
            self.buckets
                .lock()
                .unwrap()
                .insert(bucket.to_string(), FakeBucket::default());
        }
        Ok(())
    }

    async fn get_encryption(&self, bucket: &str) -> Result<Vec<String>> {
        self.record("get_encryption", &[bucket])?;
        self.with_existing(bucket, |b| b.encryption.clone())
    }

    async fn put_encryption(&self, bucket: &str, algorithm: &str) -> Result<()> {
        self.record("put_encryption", &[bucket, algorithm])?;
        self.with_existing(bucket, |b| b.encryption = vec![algorithm.to_string()])
    }

    async fn get_versioning(&self, bucket: &str) -> Result<Option<FacetStatus>> {
        self.record("get_versioning", &[bucket])?;
        self.with_existing(bucket, |b| b.versioning)
    }

    async fn put_versioning(&self, bucket: &str, status: FacetStatus) -> Result<()> {
        self.record("put_versioning", &[bucket, &status.to_string()])?;
        self.with_existing(bucket, |b| b.versioning = Some(status))
    }

    async fn get_acceleration(&self, bucket: &str) -> Result<Option<FacetStatus>> {
        self.record("get_acceleration", &[bucket])?;
        self.with_existing(bucket, |b| b.acceleration)
    }

    async fn put_acceleration(&self, bucket: &str, status: FacetStatus) -> Result<()> {
        self.record("put_acceleration", &[bucket, &status.to_string()])?;
        self.with_existing(bucket, |b| b.acceleration = Some(status))
    }

    async fn put_policy(&self, bucket: &str, policy: &str) -> Result<()> {
        self.record("put_policy", &[bucket])?;
        self.with_existing(bucket, |b| b.policy = Some(policy.to_string()))
    }

    async fn wait_until_exists(&self, bucket: &str) -> Result<()> {
        self.record("wait_until_exists", &[bucket])?;
        if self.pending.lock().unwrap().remove(bucket) {
            self.buckets
                .lock()
                .unwrap()
                .insert(bucket.to_string(), FakeBucket::default());
        }
        self.with_existing(bucket, |_| ())
            .map_err(|_| CloudError::provider(format!("bucket {bucket} did not appear")))
    }
}
