//! AWS S3 provider for bucketflow
//!
//! Implements `BucketApi` on top of `aws-sdk-s3`. Credentials and region
//! come from the SDK's default provider chain; `ProviderSettings` can pin
//! the region, point at an S3-compatible endpoint, and bound the
//! post-create waiter.
//!
//! # Example
//!
//! ```ignore
//! use bucketflow_cloud::Reconciler;
//! use bucketflow_cloud_aws::S3BucketApi;
//! use std::sync::Arc;
//!
//! let api = S3BucketApi::from_settings(&config.provider).await;
//! let reconciler = Reconciler::new(Arc::new(api));
//! let report = reconciler.reconcile(&desired).await;
//! ```

pub mod error;
pub mod provider;

pub use error::{AwsError, Result};
pub use provider::{DEFAULT_WAIT_TIMEOUT, S3BucketApi};
