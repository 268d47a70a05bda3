//! DynamoDB-backed session store.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_types::SdkConfig;

use crate::traits::{NotifyError, SessionStore};

/// Partition key of the session table.
pub const CONNECTION_ID_KEY: &str = "connectionId";

/// Session records in a DynamoDB table keyed by `connectionId` (S).
#[derive(Debug, Clone)]
pub struct DynamoSessionStore {
    table: String,
    client: aws_sdk_dynamodb::Client,
}

impl DynamoSessionStore {
    pub fn new(sdk_config: &SdkConfig, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            client: aws_sdk_dynamodb::Client::new(sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for DynamoSessionStore {
    async fn delete_session(&self, connection_id: &str) -> Result<(), NotifyError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(CONNECTION_ID_KEY, AttributeValue::S(connection_id.to_string()))
            .send()
            .await
            .map_err(|e| NotifyError::SessionStore(e.to_string()))?;

        tracing::info!(table = %self.table, connection_id, "Deleted session record");
        Ok(())
    }
}
