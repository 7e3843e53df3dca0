use anyhow::Context;
use aws_sdk_s3::operation::copy_object::builders::CopyObjectFluentBuilder;
use tracing::instrument;

/// Builds the `x-amz-copy-source` value. The sdk sends it as is, so the key has to be
/// percent encoded while keeping the `/` separators.
pub(crate) fn copy_source(bucket: &str, key: &str) -> String {
    let encoded_key = key
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");

    format!("{bucket}/{encoded_key}")
}

pub(crate) fn copy_object_request(
    client: &aws_sdk_s3::Client,
    source_bucket: &str,
    source_key: &str,
    destination_bucket: &str,
    destination_key: &str,
) -> CopyObjectFluentBuilder {
    client
        .copy_object()
        .copy_source(copy_source(source_bucket, source_key))
        .bucket(destination_bucket)
        .key(destination_key)
}

#[instrument(skip(client))]
pub(crate) async fn copy_object(
    client: &aws_sdk_s3::Client,
    source_bucket: &str,
    source_key: &str,
    destination_bucket: &str,
    destination_key: &str,
) -> anyhow::Result<()> {
    copy_object_request(
        client,
        source_bucket,
        source_key,
        destination_bucket,
        destination_key,
    )
    .send()
        .await
        .with_context(|| {
            format!(
                "failed to copy {source_bucket}/{source_key} to {destination_bucket}/{destination_key}"
            )
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::{BehaviorVersion, Region};

    use super::{copy_object_request, copy_source};

    fn client() -> aws_sdk_s3::Client {
        aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .build(),
        )
    }

    #[test]
    fn copy_source_keeps_plain_keys() {
        assert_eq!(
            copy_source("landing-zone", "uploads/2024/report.csv"),
            "landing-zone/uploads/2024/report.csv"
        );
    }

    #[test]
    fn copy_source_encodes_key_segments() {
        assert_eq!(
            copy_source("landing-zone", "uploads/my report+1.csv"),
            "landing-zone/uploads/my%20report%2B1.csv"
        );
    }

    #[test]
    fn copy_request_targets_destination_bucket() {
        let client = client();
        let request = copy_object_request(
            &client,
            "landing-zone",
            "uploads/my report.csv",
            "datalake-intro",
            "uploads/my report.csv",
        );

        assert_eq!(
            request.get_copy_source().as_deref(),
            Some("landing-zone/uploads/my%20report.csv")
        );
        assert_eq!(request.get_bucket().as_deref(), Some("datalake-intro"));
        assert_eq!(request.get_key().as_deref(), Some("uploads/my report.csv"));
    }
}
