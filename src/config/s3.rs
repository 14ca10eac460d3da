use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

/// Publishes the record set as an object in an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Client from the standard AWS environment chain, with an optional region override.
    pub async fn from_env(bucket: String, region: Option<String>) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(region) = region {
            builder = builder.region(Region::new(region));
        }
        let client = S3Client::from_conf(builder.build());

        Self::new(client, bucket)
    }
}

impl Storage for S3Storage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type("application/json")
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| ExportError::PublishError {
                destination: format!("s3://{}", self.bucket),
                name: path.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!("PutObject s3://{}/{} ({} bytes)", self.bucket, path, data.len());
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        format!("s3://{}/{}", self.bucket, path)
    }
}
