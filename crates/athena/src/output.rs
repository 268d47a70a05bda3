use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::AthenaError;

/// Bucket and key of a query result file, parsed from an `s3://bucket/key` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLocation {
    pub bucket: String,
    pub key: String,
}

impl OutputLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Split an S3 URI into bucket and key.
    ///
    /// The key is everything after the first `/` following the bucket, so
    /// nested prefixes are kept intact. Both parts must be non-empty.
    pub fn parse(uri: &str) -> Result<Self, AthenaError> {
        let invalid = || AthenaError::InvalidOutputLocation(uri.to_string());

        let rest = uri.trim().strip_prefix("s3://").ok_or_else(invalid)?;
        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;

        if bucket.is_empty() || key.is_empty() || key.ends_with('/') {
            return Err(invalid());
        }

        Ok(Self::new(bucket, key))
    }
}

impl FromStr for OutputLocation {
    type Err = AthenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
