//! AWS Athena query submission client.
//!
//! Provides the [`QueryEngine`] seam used by the handlers and its
//! production implementation [`AthenaClient`]. Queries are submitted and
//! their status read exactly once per call; tracking a running query is
//! left to the state machine.

use async_trait::async_trait;
use aws_types::SdkConfig;
use tracing::{debug, info};

use relay_core::RelayConfig;

use crate::status::{QueryState, QueryStatus};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to Athena or S3.
#[derive(Debug, thiserror::Error)]
pub enum AthenaError {
    /// An AWS SDK error (stringified).
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    /// A response lacked a field the service always documents.
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    /// An S3 URI could not be split into bucket and key.
    #[error("Invalid output location: {0}")]
    InvalidOutputLocation(String),

    /// The S3 presigner refused the request.
    #[error("Presign error: {0}")]
    Presign(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Managed query engine the dispatcher submits SQL to.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Submit `sql` and return the query execution ID.
    async fn start_query(&self, sql: &str) -> Result<String, AthenaError>;

    /// Read the current status of an existing query execution.
    async fn query_status(&self, query_id: &str) -> Result<QueryStatus, AthenaError>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`QueryEngine`] backed by the AWS SDK Athena client.
///
/// Every query runs against the configured database and workgroup and writes
/// its result under `s3://{bucket}/{output_dir}/`.
pub struct AthenaClient {
    database: String,
    workgroup: String,
    output_location: String,
    athena_client: aws_sdk_athena::Client,
}

impl AthenaClient {
    /// Create a new [`AthenaClient`] from a loaded SDK config.
    pub fn new(sdk_config: &SdkConfig, config: &RelayConfig) -> Self {
        let client = Self {
            database: config.database.clone(),
            workgroup: config.workgroup.clone(),
            output_location: config.output_location(),
            athena_client: aws_sdk_athena::Client::new(sdk_config),
        };

        info!(
            database = %client.database,
            workgroup = %client.workgroup,
            output_location = %client.output_location,
            "AthenaClient initialised"
        );

        client
    }

    /// Extract a [`QueryStatus`] from an SDK [`QueryExecution`].
    ///
    /// [`QueryExecution`]: aws_sdk_athena::types::QueryExecution
    fn extract_status(
        query_id: &str,
        qe: &aws_sdk_athena::types::QueryExecution,
    ) -> QueryStatus {
        let status = qe.status();

        QueryStatus {
            query_id: query_id.to_string(),
            state: status
                .and_then(|s| s.state())
                .map(QueryState::from)
                .unwrap_or(QueryState::Queued),
            state_change_reason: status
                .and_then(|s| s.state_change_reason())
                .map(|s| s.to_string()),
            output_location: qe
                .result_configuration()
                .and_then(|rc| rc.output_location())
                .map(|s| s.to_string()),
        }
    }
}

#[async_trait]
impl QueryEngine for AthenaClient {
    async fn start_query(&self, sql: &str) -> Result<String, AthenaError> {
        info!(sql = %sql, "Starting Athena query");

        let start_resp = self
            .athena_client
            .start_query_execution()
            .query_string(sql)
            .query_execution_context({
                let mut ctx = aws_sdk_athena::types::QueryExecutionContext::builder();
                if !self.database.is_empty() {
                    ctx = ctx.database(&self.database);
                }
                ctx.build()
            })
            .result_configuration(
                aws_sdk_athena::types::ResultConfiguration::builder()
                    .output_location(&self.output_location)
                    .build(),
            )
            .work_group(&self.workgroup)
            .send()
            .await
            .map_err(|e| AthenaError::AwsSdk(e.to_string()))?;

        let query_id = start_resp
            .query_execution_id()
            .ok_or(AthenaError::MissingField("QueryExecutionId"))?
            .to_string();

        info!(query_id = %query_id, "Query execution started");
        Ok(query_id)
    }

    async fn query_status(&self, query_id: &str) -> Result<QueryStatus, AthenaError> {
        let resp = self
            .athena_client
            .get_query_execution()
            .query_execution_id(query_id)
            .send()
            .await
            .map_err(|e| AthenaError::AwsSdk(e.to_string()))?;

        let qe = resp
            .query_execution()
            .ok_or(AthenaError::MissingField("QueryExecution"))?;

        let status = Self::extract_status(query_id, qe);
        debug!(
            query_id = %query_id,
            state = %status.state,
            output_location = ?status.output_location,
            "Fetched query status"
        );
        Ok(status)
    }
}

// ---------------------------------------------------------------------------
// Tests: status extraction only, no AWS calls
// ---------------------------------------------------------------------------
