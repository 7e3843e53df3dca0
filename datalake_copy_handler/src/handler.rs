use std::sync::Arc;

use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    config::Config,
    model::{CopyResponse, ObjectReference},
    service,
};

/// Handles the SQS event
/// The queue is set up with a batch size of 1, any extra records are ignored.
/// Nothing is retried here: a failed copy fails the invocation and the queue redelivers.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler(
    s3_client: Arc<service::s3::S3>,
    config: Arc<Config>,
    event: LambdaEvent<SqsEvent>,
) -> Result<CopyResponse, Error> {
    tracing::trace!("processing event");

    let mut source = ObjectReference::from_sqs_event(&event.payload)?;

    if config.decode_object_keys {
        source = source.into_decoded()?;
    }

    tracing::info!(
        source_bucket = %source.bucket,
        key = %source.key,
        destination_bucket = %config.destination_bucket,
        "copying object"
    );

    s3_client
        .copy_object(
            &source.bucket,
            &source.key,
            &config.destination_bucket,
            &source.key,
        )
        .await
        .inspect_err(|e| tracing::error!(error=?e, "failed to copy object"))?;

    tracing::info!("object copied");

    Ok(CopyResponse::success())
}
