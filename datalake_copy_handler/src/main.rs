#![recursion_limit = "256"]

use std::sync::Arc;

use anyhow::Context;
use aws_config::{Region, meta::region::RegionProviderChain};
use aws_lambda_events::event::sqs::SqsEvent;
use datalake_copy_handler::{config::Config, handler::handler, service};
use datalake_entrypoint::Entrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(config=?config, "initialized config");

    let region_provider = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let s3_client = service::s3::S3::new(aws_sdk_s3::Client::new(&aws_config));

    tracing::trace!("initialized s3 client");

    // Shared references, reused across invocations
    let shared_s3_client = Arc::new(s3_client);
    let shared_config = Arc::new(config);

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| {
        let s3_client = shared_s3_client.clone();
        let config = shared_config.clone();
        async move { handler(s3_client, config, event).await }
    });

    run(func).await
}
