use std::fmt;

use aws_sdk_athena::types::QueryExecutionState;
use serde::{Deserialize, Serialize};

/// Execution state of an Athena query.
///
/// Compared by value; the string Athena reports is mapped once, on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryState {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    /// A state this build does not know about yet, kept verbatim.
    Unknown(String),
}

impl QueryState {
    /// `true` for states from which the query can no longer produce results.
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryState::Failed | QueryState::Cancelled)
    }

    /// `true` once Athena will not change the state again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryState::Succeeded | QueryState::Failed | QueryState::Cancelled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            QueryState::Queued => "QUEUED",
            QueryState::Running => "RUNNING",
            QueryState::Succeeded => "SUCCEEDED",
            QueryState::Failed => "FAILED",
            QueryState::Cancelled => "CANCELLED",
            QueryState::Unknown(s) => s,
        }
    }
}

impl From<&QueryExecutionState> for QueryState {
    fn from(state: &QueryExecutionState) -> Self {
        match state {
            QueryExecutionState::Queued => QueryState::Queued,
            QueryExecutionState::Running => QueryState::Running,
            QueryExecutionState::Succeeded => QueryState::Succeeded,
            QueryExecutionState::Failed => QueryState::Failed,
            QueryExecutionState::Cancelled => QueryState::Cancelled,
            other => QueryState::Unknown(other.as_str().to_string()),
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one query execution as reported by `GetQueryExecution`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStatus {
    /// Athena query execution ID.
    pub query_id: String,
    pub state: QueryState,
    /// Why the state last changed (set for failures).
    pub state_change_reason: Option<String>,
    /// S3 URI of the result file, once Athena has assigned one.
    pub output_location: Option<String>,
}
