use aws_lambda_events::event::sqs::SqsEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code returned after a successful copy. This is not a valid http status, it is
/// kept as is because whatever consumes the lambda result may be matching on it.
pub const SUCCESS_STATUS_CODE: i64 = 3000;

pub const SUCCESS_MESSAGE: &str = "File has been Successfully Copied";

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("expected at least 1 sqs record, got 0")]
    NoRecords,
    #[error("sqs record has no body")]
    MissingBody,
    #[error("sqs record body is not a valid sns envelope: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("sns message is not a valid s3 event notification: {0}")]
    MalformedMessage(#[source] serde_json::Error),
    #[error("expected at least 1 s3 notification record, got 0")]
    NoNotificationRecords,
    #[error("object key is not valid url encoded utf-8: {0}")]
    InvalidKeyEncoding(String),
}

/// The body of an sqs message delivered by an sns subscription
#[derive(Debug, Deserialize)]
struct SnsEnvelope {
    #[serde(rename = "Message")]
    message: String,
}

// see: https://docs.aws.amazon.com/AmazonS3/latest/userguide/notification-content-structure.html
// only the fields we read are modelled
#[derive(Debug, Deserialize)]
struct S3Notification {
    #[serde(rename = "Records")]
    records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct S3NotificationRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Bucket,
    object: Object,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Object {
    key: String,
}

/// The object an upload notification points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReference {
    pub bucket: String,
    pub key: String,
}

impl ObjectReference {
    /// Unwraps sqs record -> sns envelope -> s3 notification and reads the bucket and key.
    /// Only the first sqs record and the first notification record are used.
    pub fn from_sqs_event(event: &SqsEvent) -> Result<Self, EnvelopeError> {
        let record = event.records.first().ok_or(EnvelopeError::NoRecords)?;

        if event.records.len() > 1 {
            tracing::warn!(
                record_count = event.records.len(),
                "only the first sqs record is processed"
            );
        }

        let body = record.body.as_deref().ok_or(EnvelopeError::MissingBody)?;
        let envelope: SnsEnvelope =
            serde_json::from_str(body).map_err(EnvelopeError::MalformedBody)?;
        let notification: S3Notification =
            serde_json::from_str(&envelope.message).map_err(EnvelopeError::MalformedMessage)?;

        if notification.records.len() > 1 {
            tracing::warn!(
                record_count = notification.records.len(),
                "only the first s3 notification record is processed"
            );
        }

        let entity = notification
            .records
            .into_iter()
            .next()
            .ok_or(EnvelopeError::NoNotificationRecords)?
            .s3;

        Ok(Self {
            bucket: entity.bucket.name,
            key: entity.object.key,
        })
    }

    /// Replaces the key with its url decoded form
    pub fn into_decoded(self) -> Result<Self, EnvelopeError> {
        Ok(Self {
            key: decode_object_key(&self.key)?,
            bucket: self.bucket,
        })
    }
}

/// Decodes a key the way s3 encodes it in event notifications: spaces become `+`
/// and everything else is percent encoded.
pub fn decode_object_key(key: &str) -> Result<String, EnvelopeError> {
    let key = key.replace('+', " ");
    urlencoding::decode(&key)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| EnvelopeError::InvalidKeyEncoding(key.clone()))
}

/// What the lambda returns to the invoking platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyResponse {
    pub status_code: i64,
    /// A json encoded string literal
    pub body: String,
}

impl CopyResponse {
    pub fn success() -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            body: format!("\"{SUCCESS_MESSAGE}\""),
        }
    }
}
