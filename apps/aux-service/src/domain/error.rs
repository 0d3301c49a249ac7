use std::fmt;

/// AWS service a failed call was addressed to. Only used for error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwsService {
    S3,
    Ssm,
}

impl fmt::Display for AwsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S3 => write!(f, "S3"),
            Self::Ssm => write!(f, "SSM"),
        }
    }
}

/// Failures surfaced by the AWS-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named parameter does not exist.
    #[error("Parameter '{0}' not found")]
    ParameterNotFound(String),

    /// Any other provider failure, including one mid-pagination. There is
    /// no partial-result contract: a failure on page k fails the whole
    /// operation.
    #[error("Error calling AWS {service}: {message}")]
    Upstream { service: AwsService, message: String },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_parameter() {
        let err = StoreError::ParameterNotFound("/app/db".to_owned());
        assert_eq!(err.to_string(), "Parameter '/app/db' not found");
    }

    #[test]
    fn upstream_message_names_the_service() {
        let err = StoreError::Upstream {
            service: AwsService::Ssm,
            message: "throttled".to_owned(),
        };
        assert_eq!(err.to_string(), "Error calling AWS SSM: throttled");
    }
}
