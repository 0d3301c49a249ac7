use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::domain::error::{AwsService, StoreError};
use crate::domain::model::BucketSummary;
use crate::domain::ports::BucketStore;

/// S3-backed bucket listing.
#[derive(Debug, Clone)]
pub struct S3Buckets {
    client: aws_sdk_s3::Client,
}

impl S3Buckets {
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BucketStore for S3Buckets {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StoreError> {
        let output = self.client.list_buckets().send().await.map_err(|err| {
            let message = DisplayErrorContext(&err).to_string();
            tracing::error!(error = %message, "Error calling AWS S3");
            StoreError::Upstream {
                service: AwsService::S3,
                message,
            }
        })?;

        Ok(output
            .buckets()
            .iter()
            .map(|bucket| BucketSummary {
                name: bucket.name().unwrap_or_default().to_owned(),
                creation_date: bucket.creation_date().and_then(super::datetime_to_chrono),
            })
            .collect())
    }
}
