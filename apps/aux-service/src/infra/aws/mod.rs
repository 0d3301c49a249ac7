//! AWS SDK adapters implementing the domain store ports.

mod s3;
mod ssm;

pub use s3::S3Buckets;
pub use ssm::SsmParameters;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use chrono::{DateTime, Utc};

use crate::config::{AwsConfig, DEFAULT_REGION};

/// Build the S3 and SSM clients from the ambient AWS environment plus the
/// service's own overrides.
///
/// Region resolution: the standard AWS environment first, then
/// `aws.region` from config, then the fixed fallback. Credentials come
/// from the default provider chain (IAM role in-cluster, no keys in
/// config).
pub async fn build_clients(config: &AwsConfig) -> (aws_sdk_s3::Client, aws_sdk_ssm::Client) {
    let region = RegionProviderChain::default_provider()
        .or_else(
            config
                .region
                .clone()
                .map_or_else(|| Region::new(DEFAULT_REGION), Region::new),
        );
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let s3_client = {
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = config.endpoint_url.as_deref() {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        aws_sdk_s3::Client::from_conf(builder.build())
    };

    let ssm_client = {
        let mut builder = aws_sdk_ssm::config::Builder::from(&shared);
        if let Some(endpoint) = config.endpoint_url.as_deref() {
            builder = builder.endpoint_url(endpoint);
        }
        aws_sdk_ssm::Client::from_conf(builder.build())
    };

    (s3_client, ssm_client)
}

/// Convert a smithy timestamp to chrono, dropping values outside the
/// representable range.
pub(crate) fn datetime_to_chrono(dt: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    dt.to_millis().ok().and_then(DateTime::from_timestamp_millis)
}
