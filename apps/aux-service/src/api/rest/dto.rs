//! Wire DTOs. Field names are camelCase per the public contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::{BucketSummary, ParameterDetail, ParameterSummary, ParameterType};

/// Service name reported on `/health` and `/version`.
pub const SERVICE_NAME: &str = "aux-service";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionDto {
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDto {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BucketsDto {
    pub buckets: Vec<BucketDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterTypeDto {
    String,
    StringList,
    SecureString,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSummaryDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterTypeDto,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub version: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParametersDto {
    pub parameters: Vec<ParameterSummaryDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDetailDto {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ParameterTypeDto,
    pub version: i64,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl From<ParameterType> for ParameterTypeDto {
    fn from(kind: ParameterType) -> Self {
        match kind {
            ParameterType::String => Self::String,
            ParameterType::StringList => Self::StringList,
            ParameterType::SecureString => Self::SecureString,
        }
    }
}

impl From<BucketSummary> for BucketDto {
    fn from(b: BucketSummary) -> Self {
        Self {
            name: b.name,
            creation_date: b.creation_date,
        }
    }
}

impl From<Vec<BucketSummary>> for BucketsDto {
    fn from(buckets: Vec<BucketSummary>) -> Self {
        Self {
            buckets: buckets.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ParameterSummary> for ParameterSummaryDto {
    fn from(p: ParameterSummary) -> Self {
        Self {
            name: p.name,
            kind: p.kind.into(),
            last_modified_date: p.last_modified_date,
            version: p.version,
        }
    }
}

impl From<Vec<ParameterSummary>> for ParametersDto {
    fn from(parameters: Vec<ParameterSummary>) -> Self {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ParameterDetail> for ParameterDetailDto {
    fn from(p: ParameterDetail) -> Self {
        Self {
            name: p.name,
            value: p.value,
            kind: p.kind.into(),
            version: p.version,
            last_modified_date: p.last_modified_date,
        }
    }
}
