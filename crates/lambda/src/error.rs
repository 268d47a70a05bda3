use relay_athena::AthenaError;
use relay_core::Outcome;
use relay_notify::NotifyError;
use relay_workflow::WorkflowError;

/// Downstream failures a handler converts into a 502 at its boundary.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Submitting the query or reading its status failed.
    #[error("Athena request failed: {0}")]
    Query(#[source] AthenaError),

    /// Athena reports the query as failed or cancelled.
    #[error("Query {query_id} ended in state {state}")]
    QueryEnded { query_id: String, state: String },

    /// No result object could be located or signed.
    #[error("Unable to generate PreSignedUrl: {0}")]
    Presign(#[source] AthenaError),

    /// The result lives outside the configured bucket.
    #[error("Result bucket {bucket} is not the configured bucket")]
    ForeignBucket { bucket: String },

    #[error("Delivery failed: {0}")]
    Delivery(#[from] NotifyError),

    #[error("Workflow start failed: {0}")]
    Workflow(#[from] WorkflowError),
}

impl HandlerError {
    /// Fixed response reported to the client for this failure.
    pub fn outcome(&self) -> Outcome {
        match self {
            HandlerError::Query(_) | HandlerError::QueryEnded { .. } => Outcome::QueryFailed,
            HandlerError::Presign(_) | HandlerError::ForeignBucket { .. } => {
                Outcome::PresignFailed
            }
            HandlerError::Delivery(_) => Outcome::DeliveryFailed,
            HandlerError::Workflow(_) => Outcome::Internal,
        }
    }
}
