//! Post-create wait helper

use crate::provider::BucketApi;

/// Wait for a just-created bucket to become reachable
///
/// Polling interval and attempt budget belong to the provider's waiter.
/// A timeout or poll error is logged and reported as `false`; it never
/// aborts the run.
pub async fn wait_until_exists(api: &dyn BucketApi, bucket: &str) -> bool {
    match api.wait_until_exists(bucket).await {
        Ok(()) => {
            tracing::debug!(bucket, "Bucket is reachable");
            true
        }
        Err(e) => {
            tracing::warn!(bucket, error = %e, "Gave up waiting for bucket, continuing anyway");
            false
        }
    }
}
