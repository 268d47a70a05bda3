//! Query dispatch: submit the client's SQL and route its completion.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{error, info, warn};

use relay_athena::{OutputLocation, QueryEngine, QueryState, UrlPresigner};
use relay_core::{HandlerResponse, Outcome, RelayConfig, PRESIGN_EXPIRES_SECS};
use relay_notify::{Delivery, PresignedUrlMessage};
use relay_workflow::{WorkflowInput, WorkflowStarter};

use crate::error::HandlerError;
use crate::events::WebSocketEvent;

pub const IN_PROGRESS_MESSAGE: &str = "Query has been executed and in progress";

/// Handles WebSocket messages carrying a SQL query.
///
/// The query's status is checked once right after submission. A query that
/// already succeeded is answered directly over the connection; a running one
/// is handed to the tracking workflow, which later invokes the responder.
pub struct Dispatcher {
    config: RelayConfig,
    engine: Arc<dyn QueryEngine>,
    presigner: Arc<dyn UrlPresigner>,
    delivery: Delivery,
    workflow: Arc<dyn WorkflowStarter>,
}

impl Dispatcher {
    pub fn new(
        config: RelayConfig,
        engine: Arc<dyn QueryEngine>,
        presigner: Arc<dyn UrlPresigner>,
        delivery: Delivery,
        workflow: Arc<dyn WorkflowStarter>,
    ) -> Self {
        Self {
            config,
            engine,
            presigner,
            delivery,
            workflow,
        }
    }

    /// Entry point for raw Lambda payloads. Never fails: payloads that do not
    /// even look like a WebSocket event are refused with 403.
    pub async fn handle_json(&self, payload: serde_json::Value) -> HandlerResponse {
        match serde_json::from_value::<WebSocketEvent>(payload) {
            Ok(event) => self.handle(event).await,
            Err(e) => {
                warn!(error = %e, "Unrecognised dispatcher event");
                Outcome::Forbidden.into()
            }
        }
    }

    pub async fn handle(&self, event: WebSocketEvent) -> HandlerResponse {
        info!(
            api_request_id = ?event.request_context.request_id,
            connection_id = ?event.request_context.connection_id,
            "Dispatch request"
        );

        match self.dispatch(&event).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Dispatch failed");
                e.outcome().into()
            }
        }
    }

    async fn dispatch(&self, event: &WebSocketEvent) -> Result<HandlerResponse, HandlerError> {
        if !self.api_allowed(event.api_id()) {
            warn!(api_id = ?event.api_id(), "Request from unexpected API");
            return Ok(Outcome::Forbidden.into());
        }

        let Some(sql) = event.query() else {
            return Ok(Outcome::MissingQuery.into());
        };

        let (Some(connection_id), Some(endpoint)) =
            (event.connection_id(), event.callback_endpoint())
        else {
            warn!("Request lacks connection routing context");
            return Ok(Outcome::Forbidden.into());
        };

        info!(sql = %sql, "User query");
        let query_id = self
            .engine
            .start_query(&sql)
            .await
            .map_err(HandlerError::Query)?;

        let status = self
            .engine
            .query_status(&query_id)
            .await
            .map_err(HandlerError::Query)?;
        info!(query_id = %query_id, state = %status.state, "Query state");

        match status.state {
            state if state.is_failure() => Err(HandlerError::QueryEnded {
                query_id,
                state: state.to_string(),
            }),
            QueryState::Succeeded => {
                self.reply_now(&query_id, connection_id, &endpoint).await
            }
            _ => self.hand_off(query_id, connection_id, endpoint).await,
        }
    }

    fn api_allowed(&self, api_id: Option<&str>) -> bool {
        match (api_id, self.config.api_id.as_deref()) {
            (None, _) => false,
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
        }
    }

    /// The result is already in S3: sign it and push it over the connection.
    async fn reply_now(
        &self,
        query_id: &str,
        connection_id: &str,
        endpoint: &str,
    ) -> Result<HandlerResponse, HandlerError> {
        let location = OutputLocation::new(
            self.config.bucket_name.clone(),
            self.config.result_key(query_id),
        );

        let signed = self
            .presigner
            .presign_get(&location, Duration::from_secs(PRESIGN_EXPIRES_SECS))
            .await
            .map_err(HandlerError::Presign)?;

        self.delivery
            .deliver(endpoint, connection_id, &PresignedUrlMessage::new(&signed.url))
            .await?;

        Ok(HandlerResponse::ok(&json!({
            "PreSignedUrl": signed.url,
            "ExpiresIn": signed.expires_in_secs,
        })))
    }

    /// The query is still running: let the tracking workflow finish the job.
    async fn hand_off(
        &self,
        query_id: String,
        connection_id: &str,
        endpoint: String,
    ) -> Result<HandlerResponse, HandlerError> {
        let input = WorkflowInput::new(query_id, connection_id, endpoint);
        self.workflow.start(&input).await?;

        Ok(HandlerResponse::ok(&json!({
            "query_id": input.query_id(),
            "message": IN_PROGRESS_MESSAGE,
        })))
    }
}
