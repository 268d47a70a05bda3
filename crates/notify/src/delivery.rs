//! Pushes a message to one client and closes its connection.
//!
//! A connection that the gateway reports as gone is stale: its session
//! record is evicted from the session store. Eviction is best-effort and
//! never changes the error returned to the caller.

use std::sync::Arc;

use serde::Serialize;

use crate::traits::{ConnectionGateway, NotifyError, SessionStore};

/// WebSocket message carrying a result download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedUrlMessage {
    #[serde(rename = "pre-signed-url")]
    pub url: String,
}

impl PresignedUrlMessage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// One-shot delivery to a WebSocket client.
#[derive(Clone)]
pub struct Delivery {
    gateway: Arc<dyn ConnectionGateway>,
    sessions: Arc<dyn SessionStore>,
}

impl Delivery {
    pub fn new(gateway: Arc<dyn ConnectionGateway>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { gateway, sessions }
    }

    /// Serialize `message` as JSON, push it, then close the connection.
    ///
    /// Exactly one push is attempted, followed by one close if the push
    /// succeeded. On a gone connection the session record is deleted before
    /// the error is returned.
    pub async fn deliver<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        connection_id: &str,
        message: &T,
    ) -> Result<(), NotifyError> {
        let data = serde_json::to_vec(message)?;

        let start = std::time::Instant::now();
        let result = self.push_and_close(endpoint, connection_id, &data).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(()) => {
                tracing::info!(connection_id, duration_ms, "Message delivered, connection closed");
            }
            Err(e) => {
                tracing::warn!(connection_id, error = %e, duration_ms, "Unable to send the message");
                if e.is_gone() {
                    self.evict(connection_id).await;
                }
            }
        }

        result
    }

    async fn push_and_close(
        &self,
        endpoint: &str,
        connection_id: &str,
        data: &[u8],
    ) -> Result<(), NotifyError> {
        self.gateway
            .post_to_connection(endpoint, connection_id, data)
            .await?;
        self.gateway.delete_connection(endpoint, connection_id).await
    }

    async fn evict(&self, connection_id: &str) {
        tracing::info!(connection_id, "Found stale connection, deleting session record");
        if let Err(e) = self.sessions.delete_session(connection_id).await {
            tracing::warn!(connection_id, error = %e, "Stale session eviction failed");
        }
    }
}
