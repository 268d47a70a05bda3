use serde::{Deserialize, Serialize};

/// Reference to one Athena query execution, in the shape Athena's own API uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExecutionRef {
    #[serde(rename = "QueryExecutionId")]
    pub query_execution_id: String,
}

/// Execution input of the tracking state machine.
///
/// The state machine waits on `QueryExecution` and passes the whole
/// document on to the responder, which routes the result back through
/// `EndpointURL` to `ConnectionId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInput {
    #[serde(rename = "QueryExecution")]
    pub query_execution: QueryExecutionRef,
    #[serde(rename = "ConnectionId")]
    pub connection_id: String,
    #[serde(rename = "EndpointURL")]
    pub endpoint_url: String,
}

impl WorkflowInput {
    pub fn new(
        query_id: impl Into<String>,
        connection_id: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Self {
        Self {
            query_execution: QueryExecutionRef {
                query_execution_id: query_id.into(),
            },
            connection_id: connection_id.into(),
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn query_id(&self) -> &str {
        &self.query_execution.query_execution_id
    }
}
