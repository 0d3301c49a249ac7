use http::StatusCode;

/// Failures on the gateway's primary proxy path.
///
/// The enrichment path never produces one of these: its failures are
/// absorbed into [`AuxVersion::Unreachable`](super::service::AuxVersion).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The facade answered with a non-success status. Status and body are
    /// relayed to the caller verbatim; the facade already classified the
    /// failure and the gateway must not re-classify it.
    #[error("aux-service returned {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// The facade call never produced a usable response (timeout, connect
    /// failure, undecodable payload).
    #[error("Error calling aux-service: {message}")]
    Unreachable { message: String },
}
