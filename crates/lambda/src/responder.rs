//! Result delivery for queries tracked by the state machine.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{error, info, warn};

use relay_athena::{AthenaError, OutputLocation, QueryEngine, UrlPresigner};
use relay_core::{HandlerResponse, Outcome, RelayConfig, PRESIGN_EXPIRES_SECS};
use relay_notify::{Delivery, PresignedUrlMessage};

use crate::error::HandlerError;
use crate::events::ResponderEvent;

pub const DATA_SENT_MESSAGE: &str = "Data Sent";

/// Pushes the pre-signed URL of a completed query to its client.
pub struct Responder {
    config: RelayConfig,
    engine: Arc<dyn QueryEngine>,
    presigner: Arc<dyn UrlPresigner>,
    delivery: Delivery,
}

impl Responder {
    pub fn new(
        config: RelayConfig,
        engine: Arc<dyn QueryEngine>,
        presigner: Arc<dyn UrlPresigner>,
        delivery: Delivery,
    ) -> Self {
        Self {
            config,
            engine,
            presigner,
            delivery,
        }
    }

    /// Entry point for raw Lambda payloads. Never fails.
    pub async fn handle_json(&self, payload: serde_json::Value) -> HandlerResponse {
        match serde_json::from_value::<ResponderEvent>(payload) {
            Ok(event) => self.handle(event).await,
            Err(e) => {
                warn!(error = %e, "Unrecognised responder event");
                Outcome::Forbidden.into()
            }
        }
    }

    pub async fn handle(&self, event: ResponderEvent) -> HandlerResponse {
        match self.respond(&event).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    query_id = ?event.query_id(),
                    connection_id = ?event.connection_id(),
                    error = %e,
                    "Unable to respond"
                );
                e.outcome().into()
            }
        }
    }

    async fn respond(&self, event: &ResponderEvent) -> Result<HandlerResponse, HandlerError> {
        let Some(query_id) = event.query_id() else {
            warn!("Responder invoked without a query execution");
            return Ok(Outcome::Forbidden.into());
        };

        let (Some(connection_id), Some(endpoint)) = (event.connection_id(), event.endpoint_url())
        else {
            warn!(query_id = %query_id, "Responder invoked without connection routing");
            return Ok(Outcome::Forbidden.into());
        };

        let location = self.resolve_location(query_id, event).await?;
        if !self.config.bucket_name.is_empty() && location.bucket != self.config.bucket_name {
            return Err(HandlerError::ForeignBucket {
                bucket: location.bucket,
            });
        }

        let signed = self
            .presigner
            .presign_get(&location, Duration::from_secs(PRESIGN_EXPIRES_SECS))
            .await
            .map_err(HandlerError::Presign)?;

        self.delivery
            .deliver(endpoint, connection_id, &PresignedUrlMessage::new(signed.url))
            .await?;

        info!(query_id = %query_id, connection_id = %connection_id, "Result URL delivered");
        Ok(HandlerResponse::ok(&json!({ "message": DATA_SENT_MESSAGE })))
    }

    /// Where the query wrote its result: the location recorded in the event,
    /// else whatever Athena reports for the execution.
    async fn resolve_location(
        &self,
        query_id: &str,
        event: &ResponderEvent,
    ) -> Result<OutputLocation, HandlerError> {
        let uri = match event.recorded_output_location() {
            Some(uri) => uri.to_string(),
            None => {
                info!(query_id = %query_id, "No recorded output location, asking Athena");
                self.engine
                    .query_status(query_id)
                    .await
                    .map_err(HandlerError::Presign)?
                    .output_location
                    .ok_or(HandlerError::Presign(AthenaError::MissingField(
                        "ResultConfiguration.OutputLocation",
                    )))?
            }
        };

        OutputLocation::parse(&uri).map_err(HandlerError::Presign)
    }
}
