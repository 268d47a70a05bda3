//! Starting executions of the tracking state machine.

use async_trait::async_trait;
use aws_types::SdkConfig;
use tracing::info;

use crate::input::WorkflowInput;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable workflow that waits for a query and then invokes the responder.
#[async_trait]
pub trait WorkflowStarter: Send + Sync {
    async fn start(&self, input: &WorkflowInput) -> Result<(), WorkflowError>;
}

/// [`WorkflowStarter`] backed by an AWS Step Functions state machine.
///
/// Executions are named after the query id, so a redelivered dispatch
/// event cannot start a second execution for the same query.
pub struct StepFunctionsStarter {
    state_machine_arn: String,
    client: aws_sdk_sfn::Client,
}

impl StepFunctionsStarter {
    pub fn new(sdk_config: &SdkConfig, state_machine_arn: impl Into<String>) -> Self {
        Self {
            state_machine_arn: state_machine_arn.into(),
            client: aws_sdk_sfn::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl WorkflowStarter for StepFunctionsStarter {
    async fn start(&self, input: &WorkflowInput) -> Result<(), WorkflowError> {
        let payload = serde_json::to_string(input)?;

        let resp = self
            .client
            .start_execution()
            .state_machine_arn(&self.state_machine_arn)
            .name(input.query_id())
            .input(payload)
            .send()
            .await
            .map_err(|e| WorkflowError::AwsSdk(e.to_string()))?;

        info!(
            query_id = %input.query_id(),
            connection_id = %input.connection_id,
            execution_arn = ?resp.execution_arn(),
            "Started tracking workflow"
        );
        Ok(())
    }
}
