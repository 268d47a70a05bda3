//! responder: Lambda invoked by the tracking state machine once a query
//! has finished; pushes the pre-signed result URL to the waiting client.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use relay_athena::{AthenaClient, S3Presigner};
use relay_core::RelayConfig;
use relay_lambda::Responder;
use relay_notify::{ApiGatewayConnections, Delivery, DynamoSessionStore};

async fn build_responder() -> anyhow::Result<Responder> {
    relay_core::config::load_dotenv();
    let config = RelayConfig::from_env();
    config.validate_responder()?;
    config.log_summary();

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let delivery = Delivery::new(
        Arc::new(ApiGatewayConnections::new(&sdk_config)),
        Arc::new(DynamoSessionStore::new(&sdk_config, config.session_table.clone())),
    );

    Ok(Responder::new(
        config.clone(),
        Arc::new(AthenaClient::new(&sdk_config, &config)),
        Arc::new(S3Presigner::new(&sdk_config)),
        delivery,
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

    let responder = Arc::new(build_responder().await?);
    info!("responder ready");

    run(service_fn(move |event: LambdaEvent<Value>| {
        let responder = responder.clone();
        async move {
            info!(lambda_request_id = %event.context.request_id, "Invocation");
            Ok::<_, Error>(responder.handle_json(event.payload).await)
        }
    }))
    .await
}
