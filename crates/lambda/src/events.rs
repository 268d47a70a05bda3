//! Inbound event shapes.
//!
//! Every field is optional: a missing field is a client or routing error the
//! handlers answer with a fixed response, never a deserialization failure.

use serde::Deserialize;

// ── Dispatcher: API Gateway WebSocket message ─────────────────

/// API Gateway WebSocket proxy event (the fields the dispatcher reads).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketEvent {
    #[serde(default)]
    pub request_context: RequestContext,
    /// Raw message body, expected to be `{"data": "<sql>"}`.
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub connection_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryMessage {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl WebSocketEvent {
    pub fn api_id(&self) -> Option<&str> {
        non_empty(&self.request_context.api_id)
    }

    pub fn connection_id(&self) -> Option<&str> {
        non_empty(&self.request_context.connection_id)
    }

    /// Management API endpoint of the stage the client is connected to:
    /// `https://{domainName}/{stage}`.
    pub fn callback_endpoint(&self) -> Option<String> {
        let domain = non_empty(&self.request_context.domain_name)?;
        let stage = non_empty(&self.request_context.stage)?;
        Some(format!("https://{}/{}", domain, stage))
    }

    /// The SQL carried in the body's `data` field.
    ///
    /// `None` when the body is absent, not JSON, or `data` is missing,
    /// not a string, or blank.
    pub fn query(&self) -> Option<String> {
        let body = self.body.as_deref()?;
        let message: QueryMessage = serde_json::from_str(body).ok()?;
        match message.data? {
            serde_json::Value::String(sql) if !sql.trim().is_empty() => Some(sql),
            _ => None,
        }
    }
}

// ── Responder: state machine payload ──────────────────────────

/// Payload the tracking state machine invokes the responder with.
///
/// Carries the dispatcher's workflow input plus, under `body.job`, the
/// `GetQueryExecution` result the state machine recorded while waiting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponderEvent {
    #[serde(rename = "ConnectionId", default)]
    pub connection_id: Option<String>,
    #[serde(rename = "EndpointURL", default)]
    pub endpoint_url: Option<String>,
    #[serde(rename = "QueryExecution", default)]
    pub query_execution: Option<QueryExecutionDetail>,
    #[serde(default)]
    pub body: Option<TrackedBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryExecutionDetail {
    #[serde(default)]
    pub query_execution_id: Option<String>,
    #[serde(default)]
    pub result_configuration: Option<ResultConfiguration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultConfiguration {
    #[serde(default)]
    pub output_location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackedBody {
    #[serde(default)]
    pub job: Option<TrackedJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackedJob {
    #[serde(rename = "QueryExecution", default)]
    pub query_execution: Option<QueryExecutionDetail>,
}

impl QueryExecutionDetail {
    fn output_location(&self) -> Option<&str> {
        self.result_configuration
            .as_ref()
            .and_then(|rc| non_empty(&rc.output_location))
    }
}

impl ResponderEvent {
    pub fn query_id(&self) -> Option<&str> {
        self.query_execution
            .as_ref()
            .and_then(|qe| non_empty(&qe.query_execution_id))
    }

    pub fn connection_id(&self) -> Option<&str> {
        non_empty(&self.connection_id)
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        non_empty(&self.endpoint_url)
    }

    /// Result location recorded in the event, preferring the state
    /// machine's `body.job` snapshot over the top-level execution.
    pub fn recorded_output_location(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.job.as_ref())
            .and_then(|j| j.query_execution.as_ref())
            .and_then(QueryExecutionDetail::output_location)
            .or_else(|| {
                self.query_execution
                    .as_ref()
                    .and_then(QueryExecutionDetail::output_location)
            })
    }
}
