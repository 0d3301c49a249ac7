use http::StatusCode;
use svckit_errors::Problem;

use crate::domain::error::GatewayError;

impl From<GatewayError> for Problem {
    fn from(e: GatewayError) -> Self {
        match e {
            // Deliberate coupling: the facade's exact status is re-raised,
            // never collapsed into a generic 500.
            GatewayError::UpstreamStatus { status, body } => {
                let title = status.canonical_reason().unwrap_or("Upstream Error");
                Problem::new(status, title, body).with_code("gateway.upstream_status")
            }
            GatewayError::Unreachable { .. } => {
                Problem::new(StatusCode::BAD_GATEWAY, "Bad Gateway", e.to_string())
                    .with_code("gateway.upstream_unreachable")
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_relayed_verbatim() {
        let p = Problem::from(GatewayError::UpstreamStatus {
            status: StatusCode::NOT_FOUND,
            body: "Parameter '/app/db' not found".to_owned(),
        });
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.detail, "Parameter '/app/db' not found");
        assert_eq!(p.code, "gateway.upstream_status");
    }

    #[test]
    fn unreachable_is_always_502() {
        let p = Problem::from(GatewayError::Unreachable {
            message: "request timed out".to_owned(),
        });
        assert_eq!(p.status, StatusCode::BAD_GATEWAY);
        assert_eq!(p.detail, "Error calling aux-service: request timed out");
        assert_eq!(p.code, "gateway.upstream_unreachable");
    }
}
