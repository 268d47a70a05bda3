//! Fixed handler responses shared by both functions.
//!
//! Every outcome a handler can report maps to one `(status, body, headers)`
//! triple so clients always see the same status codes and messages.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";

/// Named outcomes with a fixed status code and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Wrong API, or the event lacks the routing/execution context.
    Forbidden,
    /// The message body carries no usable SQL query.
    MissingQuery,
    /// Athena rejected, failed or cancelled the query.
    QueryFailed,
    /// No pre-signed URL could be produced for the result object.
    PresignFailed,
    /// The URL could not be pushed to the WebSocket connection.
    DeliveryFailed,
    /// Any other downstream failure.
    Internal,
}

impl Outcome {
    pub fn status_code(self) -> u16 {
        match self {
            Outcome::Forbidden => 403,
            Outcome::MissingQuery => 400,
            Outcome::QueryFailed
            | Outcome::PresignFailed
            | Outcome::DeliveryFailed
            | Outcome::Internal => 502,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Forbidden => "Forbidden",
            Outcome::MissingQuery => "Missing required request parameters: [data]",
            Outcome::QueryFailed => "Unable to process the Athena request.",
            Outcome::PresignFailed => "Unable to generate PreSignedUrl",
            Outcome::DeliveryFailed => "Unable to deliver the PreSignedUrl",
            Outcome::Internal => "Unable to process this request.",
        }
    }

    pub fn into_response(self) -> HandlerResponse {
        HandlerResponse::json(
            self.status_code(),
            &serde_json::json!({ "message": self.message() }),
        )
    }
}

impl From<Outcome> for HandlerResponse {
    fn from(outcome: Outcome) -> Self {
        outcome.into_response()
    }
}

/// Lambda proxy response: `{"statusCode", "body", "headers"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    /// JSON document, serialized to a string as API Gateway expects.
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl HandlerResponse {
    /// Build a response with a JSON body and the permissive CORS header.
    pub fn json(status_code: u16, body: &serde_json::Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: cors_headers(),
        }
    }

    pub fn ok(body: &serde_json::Value) -> Self {
        Self::json(200, body)
    }

    /// Parse the body back into JSON. Mostly useful for callers that inspect responses.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

fn cors_headers() -> HashMap<String, String> {
    HashMap::from([(ALLOW_ORIGIN_HEADER.to_string(), "*".to_string())])
}
