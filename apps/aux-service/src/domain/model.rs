//! Read-only views over the AWS collections.
//!
//! Every value here is transient: produced per call from the provider's
//! live responses, never cached or persisted.

use chrono::{DateTime, Utc};

/// One S3 bucket as reported by `ListBuckets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

/// SSM parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

impl ParameterType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }
}

/// One parameter from the `DescribeParameters` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSummary {
    pub name: String,
    pub kind: ParameterType,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub version: i64,
}

/// A single parameter including its decrypted value.
///
/// `value` is always the decrypted form: the provider call runs with
/// decryption enabled so `SecureString` parameters come back in the clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDetail {
    pub name: String,
    pub value: String,
    pub kind: ParameterType,
    pub version: i64,
    pub last_modified_date: Option<DateTime<Utc>>,
}
