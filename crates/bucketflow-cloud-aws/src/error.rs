//! AWS provider error types

use bucketflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    /// An S3 call was rejected or could not be sent
    #[error("{operation} failed: {message}")]
    Sdk { operation: String, message: String },

    /// A request body could not be built from the given values
    #[error("Invalid request: {0}")]
    Build(#[from] aws_sdk_s3::error::BuildError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AwsError {
    /// Wrap an SDK error with its full error chain
    pub fn sdk<E>(operation: &str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Sdk {
            operation: operation.to_string(),
            message: aws_sdk_s3::error::DisplayErrorContext(&err).to_string(),
        }
    }
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::InvalidConfig(message) => CloudError::InvalidConfig(message),
            other => CloudError::Provider(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
