use axum::http::StatusCode;
use svckit_errors::Problem;

use crate::domain::error::StoreError;

impl From<StoreError> for Problem {
    fn from(e: StoreError) -> Self {
        match &e {
            StoreError::ParameterNotFound(_) => {
                Problem::new(StatusCode::NOT_FOUND, "Not Found", e.to_string())
                    .with_code("aws.parameter_not_found")
            }
            // Full detail was already logged by the adapter; the caller
            // gets the provider message without credential material.
            StoreError::Upstream { .. } => {
                Problem::new(StatusCode::BAD_GATEWAY, "Bad Gateway", e.to_string())
                    .with_code("aws.upstream_error")
            }
        }
    }
}
