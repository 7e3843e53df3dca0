mod copy;

use aws_sdk_s3 as s3;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

#[derive(Clone, Debug)]
pub struct S3Client {
    /// Inner S3 client
    inner: s3::Client,
}

#[cfg_attr(test, automock)]
impl S3Client {
    pub fn new(inner: s3::Client) -> Self {
        Self { inner }
    }

    /// Server side copy of a single object, possibly across buckets
    #[tracing::instrument(skip(self))]
    pub async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        destination_bucket: &str,
        destination_key: &str,
    ) -> anyhow::Result<()> {
        copy::copy_object(
            &self.inner,
            source_bucket,
            source_key,
            destination_bucket,
            destination_key,
        )
        .await
    }
}
