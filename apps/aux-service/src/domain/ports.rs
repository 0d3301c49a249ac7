//! Store seams between the REST layer and the AWS adapters.
//!
//! The handlers and the tests share these traits; the production
//! implementations live in `infra::aws`.

use async_trait::async_trait;

use super::error::StoreError;
use super::model::{BucketSummary, ParameterDetail, ParameterSummary};

#[async_trait]
pub trait BucketStore: Send + Sync {
    /// List every bucket in the account. Single provider call, no
    /// pagination.
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StoreError>;
}

#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Drain the provider's full paginated listing into one sequence, in
    /// provider order, without deduplication.
    async fn list_parameters(&self) -> Result<Vec<ParameterSummary>, StoreError>;

    /// Fetch one parameter with its decrypted value.
    async fn get_parameter(&self, name: &str) -> Result<ParameterDetail, StoreError>;
}
