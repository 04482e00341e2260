//! S3 implementation of `BucketApi`

use crate::error::AwsError;
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::types::{
    AccelerateConfiguration, BucketAccelerateStatus, BucketCannedAcl, BucketLocationConstraint,
    BucketVersioningStatus, CreateBucketConfiguration, ServerSideEncryption,
    ServerSideEncryptionByDefault, ServerSideEncryptionConfiguration, ServerSideEncryptionRule,
    VersioningConfiguration,
};
use bucketflow_cloud::{BucketApi, FacetStatus};
use bucketflow_core::ProviderSettings;
use std::time::Duration;

/// Upper bound for the post-create waiter when none is configured
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(100);

/// Region that rejects an explicit location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// S3 bucket provider
pub struct S3BucketApi {
    client: Client,
    region: Option<String>,
    wait_timeout: Duration,
}

impl S3BucketApi {
    /// Build a client from the SDK's default credential chain plus settings
    pub async fn from_settings(settings: &ProviderSettings) -> crate::Result<Self> {
        if settings.region.as_deref().is_some_and(str::is_empty) {
            return Err(AwsError::InvalidConfig("region must not be empty".into()));
        }
        if settings.wait_timeout_secs == Some(0) {
            return Err(AwsError::InvalidConfig(
                "wait-timeout must be at least one second".into(),
            ));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if settings.endpoint_url.is_some() {
            // S3-compatible endpoints rarely serve virtual-hosted style
            builder = builder.force_path_style(true);
        }

        let region = sdk_config.region().map(|r| r.to_string());
        tracing::debug!(
            region = region.as_deref().unwrap_or("-"),
            endpoint = settings.endpoint_url.as_deref().unwrap_or("-"),
            "Initialized S3 client"
        );

        let wait_timeout = settings
            .wait_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_WAIT_TIMEOUT);

        Ok(Self::new(Client::from_conf(builder.build()), region).with_wait_timeout(wait_timeout))
    }

    pub fn new(client: Client, region: Option<String>) -> Self {
        Self {
            client,
            region,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }
}

/// Location constraint for CreateBucket; us-east-1 must not send one
pub(crate) fn location_constraint(region: Option<&str>) -> Option<CreateBucketConfiguration> {
    let region = region.filter(|r| !r.is_empty() && *r != DEFAULT_REGION)?;
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

/// Algorithms named by the default-encryption rules
pub(crate) fn encryption_algorithms(
    config: Option<&ServerSideEncryptionConfiguration>,
) -> Vec<String> {
    config
        .map(|c| {
            c.rules()
                .iter()
                .filter_map(|rule| rule.apply_server_side_encryption_by_default())
                .map(|default| default.sse_algorithm().as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn encryption_configuration(
    algorithm: &str,
) -> crate::Result<ServerSideEncryptionConfiguration> {
    let by_default = ServerSideEncryptionByDefault::builder()
        .sse_algorithm(ServerSideEncryption::from(algorithm))
        .build()?;
    let rule = ServerSideEncryptionRule::builder()
        .apply_server_side_encryption_by_default(by_default)
        .build();
    Ok(ServerSideEncryptionConfiguration::builder()
        .rules(rule)
        .build()?)
}

pub(crate) fn versioning_status(status: Option<&BucketVersioningStatus>) -> Option<FacetStatus> {
    match status? {
        BucketVersioningStatus::Enabled => Some(FacetStatus::Enabled),
        BucketVersioningStatus::Suspended => Some(FacetStatus::Suspended),
        _ => None,
    }
}

pub(crate) fn accelerate_status(status: Option<&BucketAccelerateStatus>) -> Option<FacetStatus> {
    match status? {
        BucketAccelerateStatus::Enabled => Some(FacetStatus::Enabled),
        BucketAccelerateStatus::Suspended => Some(FacetStatus::Suspended),
        _ => None,
    }
}

fn to_versioning(status: FacetStatus) -> BucketVersioningStatus {
    match status {
        FacetStatus::Enabled => BucketVersioningStatus::Enabled,
        FacetStatus::Suspended => BucketVersioningStatus::Suspended,
    }
}

fn to_accelerate(status: FacetStatus) -> BucketAccelerateStatus {
    match status {
        FacetStatus::Enabled => BucketAccelerateStatus::Enabled,
        FacetStatus::Suspended => BucketAccelerateStatus::Suspended,
    }
}

#[async_trait]
impl BucketApi for S3BucketApi {
    fn name(&self) -> &str {
        "aws-s3"
    }

    async fn head_bucket(&self, bucket: &str) -> bucketflow_cloud::Result<()> {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::sdk("HeadBucket", e))?;
        Ok(())
    }

    async fn create_bucket(&self, bucket: &str) -> bucketflow_cloud::Result<()> {
        let mut request = self
            .client
            .create_bucket()
            .bucket(bucket)
            .acl(BucketCannedAcl::Private);

        if let Some(config) = location_constraint(self.region()) {
            request = request.create_bucket_configuration(config);
        }

        request
            .send()
            .await
            .map_err(|e| AwsError::sdk("CreateBucket", e))?;
        Ok(())
    }

    async fn get_encryption(&self, bucket: &str) -> bucketflow_cloud::Result<Vec<String>> {
        let output = self
            .client
            .get_bucket_encryption()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::sdk("GetBucketEncryption", e))?;
        Ok(encryption_algorithms(
            output.server_side_encryption_configuration(),
        ))
    }

    async fn put_encryption(&self, bucket: &str, algorithm: &str) -> bucketflow_cloud::Result<()> {
        let config = encryption_configuration(algorithm)?;
        self.client
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(|e| AwsError::sdk("PutBucketEncryption", e))?;
        Ok(())
    }

    async fn get_versioning(&self, bucket: &str) -> bucketflow_cloud::Result<Option<FacetStatus>> {
        let output = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::sdk("GetBucketVersioning", e))?;
        Ok(versioning_status(output.status()))
    }

    async fn put_versioning(
        &self,
        bucket: &str,
        status: FacetStatus,
    ) -> bucketflow_cloud::Result<()> {
        let config = VersioningConfiguration::builder()
            .status(to_versioning(status))
            .build();
        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(config)
            .send()
            .await
            .map_err(|e| AwsError::sdk("PutBucketVersioning", e))?;
        Ok(())
    }

    async fn get_acceleration(
        &self,
        bucket: &str,
    ) -> bucketflow_cloud::Result<Option<FacetStatus>> {
        let output = self
            .client
            .get_bucket_accelerate_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::sdk("GetBucketAccelerateConfiguration", e))?;
        Ok(accelerate_status(output.status()))
    }

    async fn put_acceleration(
        &self,
        bucket: &str,
        status: FacetStatus,
    ) -> bucketflow_cloud::Result<()> {
        let config = AccelerateConfiguration::builder()
            .status(to_accelerate(status))
            .build();
        self.client
            .put_bucket_accelerate_configuration()
            .bucket(bucket)
            .accelerate_configuration(config)
            .send()
            .await
            .map_err(|e| AwsError::sdk("PutBucketAccelerateConfiguration", e))?;
        Ok(())
    }

    async fn put_policy(&self, bucket: &str, policy: &str) -> bucketflow_cloud::Result<()> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(|e| AwsError::sdk("PutBucketPolicy", e))?;
        Ok(())
    }

    async fn wait_until_exists(&self, bucket: &str) -> bucketflow_cloud::Result<()> {
        self.client
            .wait_until_bucket_exists()
            .bucket(bucket)
            .wait(self.wait_timeout)
            .await
            .map_err(|e| AwsError::sdk("WaitUntilBucketExists", e))?;
        Ok(())
    }
}
