//! API Gateway Management API connection gateway.

use aws_sdk_apigatewaymanagement::primitives::Blob;
use aws_types::SdkConfig;

use crate::traits::{ConnectionGateway, NotifyError};

/// Pushes to and closes WebSocket connections through the API Gateway
/// Management API.
///
/// The management endpoint depends on the API stage each event came from,
/// so a client is built per call from the shared SDK config.
#[derive(Debug, Clone)]
pub struct ApiGatewayConnections {
    sdk_config: SdkConfig,
}

impl ApiGatewayConnections {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            sdk_config: sdk_config.clone(),
        }
    }

    fn client_for(&self, endpoint: &str) -> aws_sdk_apigatewaymanagement::Client {
        let conf = aws_sdk_apigatewaymanagement::config::Builder::from(&self.sdk_config)
            .endpoint_url(endpoint)
            .build();
        aws_sdk_apigatewaymanagement::Client::from_conf(conf)
    }
}

#[async_trait::async_trait]
impl ConnectionGateway for ApiGatewayConnections {
    async fn post_to_connection(
        &self,
        endpoint: &str,
        connection_id: &str,
        data: &[u8],
    ) -> Result<(), NotifyError> {
        self.client_for(endpoint)
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(data))
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_gone_exception() {
                    NotifyError::Gone {
                        connection_id: connection_id.to_string(),
                    }
                } else {
                    NotifyError::Gateway(service.to_string())
                }
            })?;

        tracing::debug!(connection_id, bytes = data.len(), "Posted to connection");
        Ok(())
    }

    async fn delete_connection(
        &self,
        endpoint: &str,
        connection_id: &str,
    ) -> Result<(), NotifyError> {
        self.client_for(endpoint)
            .delete_connection()
            .connection_id(connection_id)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_gone_exception() {
                    NotifyError::Gone {
                        connection_id: connection_id.to_string(),
                    }
                } else {
                    NotifyError::Gateway(service.to_string())
                }
            })?;

        tracing::debug!(connection_id, "Deleted connection");
        Ok(())
    }
}
