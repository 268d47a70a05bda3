//! dispatcher: Lambda behind the WebSocket API's query route.
//!
//! Submits the client's SQL to Athena, then either pushes the result URL at
//! once or starts the tracking state machine.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use relay_athena::{AthenaClient, S3Presigner};
use relay_core::RelayConfig;
use relay_lambda::Dispatcher;
use relay_notify::{ApiGatewayConnections, Delivery, DynamoSessionStore};
use relay_workflow::StepFunctionsStarter;

async fn build_dispatcher() -> anyhow::Result<Dispatcher> {
    relay_core::config::load_dotenv();
    let config = RelayConfig::from_env();
    config.validate_dispatcher()?;
    config.log_summary();

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let delivery = Delivery::new(
        Arc::new(ApiGatewayConnections::new(&sdk_config)),
        Arc::new(DynamoSessionStore::new(&sdk_config, config.session_table.clone())),
    );

    Ok(Dispatcher::new(
        config.clone(),
        Arc::new(AthenaClient::new(&sdk_config, &config)),
        Arc::new(S3Presigner::new(&sdk_config)),
        delivery,
        Arc::new(StepFunctionsStarter::new(&sdk_config, config.state_machine_arn.clone())),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let dispatcher = Arc::new(build_dispatcher().await?);
    info!("dispatcher ready");

    run(service_fn(move |event: LambdaEvent<Value>| {
        let dispatcher = dispatcher.clone();
        async move {
            info!(lambda_request_id = %event.context.request_id, "Invocation");
            Ok::<_, Error>(dispatcher.handle_json(event.payload).await)
        }
    }))
    .await
}
