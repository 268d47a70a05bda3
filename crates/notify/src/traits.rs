//! Delivery traits and shared error types.

/// Errors that can occur while delivering to a connection.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The gateway no longer knows the connection (HTTP 410).
    #[error("Connection {connection_id} is gone")]
    Gone { connection_id: String },

    #[error("Connection gateway error: {0}")]
    Gateway(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl NotifyError {
    /// `true` when the failure means the client has already disconnected.
    pub fn is_gone(&self) -> bool {
        matches!(self, NotifyError::Gone { .. })
    }
}

/// Connection-management API for WebSocket clients.
///
/// `endpoint` is the callback URL of the API stage the client connected to,
/// e.g. `https://abc123.execute-api.us-east-1.amazonaws.com/prod`.
#[async_trait::async_trait]
pub trait ConnectionGateway: Send + Sync {
    /// Push `data` to the client as a single WebSocket message.
    async fn post_to_connection(
        &self,
        endpoint: &str,
        connection_id: &str,
        data: &[u8],
    ) -> Result<(), NotifyError>;

    /// Close the client's connection.
    async fn delete_connection(&self, endpoint: &str, connection_id: &str)
        -> Result<(), NotifyError>;
}

/// Key-value store of WebSocket sessions, keyed by connection id.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Remove the session record of `connection_id`.
    async fn delete_session(&self, connection_id: &str) -> Result<(), NotifyError>;
}
