//! Tests for S3Presigner built from a shared SdkConfig.

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use relay_athena::*;
use relay_core::PRESIGN_EXPIRES_SECS;

async fn sdk_config(region: &'static str) -> aws_types::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
        .load()
        .await
}

#[tokio::test]
async fn presigner_uses_shared_region() {
    let presigner = S3Presigner::new(&sdk_config("eu-west-1").await);
    let location = OutputLocation::new("query-results", "athena/q-1.csv");

    let signed = presigner
        .presign_get(&location, Duration::from_secs(PRESIGN_EXPIRES_SECS))
        .await
        .unwrap();

    assert_eq!(signed.expires_in_secs, 120);
    assert!(signed.url.contains("eu-west-1"));
    assert!(signed.url.contains("query-results"));
    assert!(signed.url.contains("X-Amz-Expires=120"));
}
