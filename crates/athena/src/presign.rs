//! Pre-signed S3 GET URLs for query result files.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_types::SdkConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::AthenaError;
use crate::output::OutputLocation;

/// A time-limited download URL for one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    pub url: String,
    pub expires_in_secs: u64,
}

/// Produces pre-signed GET URLs for result objects.
#[async_trait]
pub trait UrlPresigner: Send + Sync {
    async fn presign_get(
        &self,
        location: &OutputLocation,
        expires_in: Duration,
    ) -> Result<PresignedUrl, AthenaError>;
}

/// [`UrlPresigner`] backed by the AWS SDK S3 client (SigV4 query signing).
pub struct S3Presigner {
    s3_client: aws_sdk_s3::Client,
}

impl S3Presigner {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_s3::Client::new(sdk_config))
    }

    pub fn from_client(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl UrlPresigner for S3Presigner {
    async fn presign_get(
        &self,
        location: &OutputLocation,
        expires_in: Duration,
    ) -> Result<PresignedUrl, AthenaError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AthenaError::Presign(e.to_string()))?;

        let request = self
            .s3_client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                warn!(location = %location, error = %e, "Unable to generate URL");
                AthenaError::Presign(e.to_string())
            })?;

        info!(
            location = %location,
            expires_in_secs = expires_in.as_secs(),
            "Generated pre-signed URL"
        );

        Ok(PresignedUrl {
            url: request.uri().to_string(),
            expires_in_secs: expires_in.as_secs(),
        })
    }
}
