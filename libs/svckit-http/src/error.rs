use thiserror::Error;

/// Classification of URL validation failures.
///
/// Provides programmatic matching for different failure modes without
/// relying on unstable error message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUriKind {
    /// URL could not be parsed (malformed syntax)
    ParseError,
    /// URL is missing required host/authority component
    MissingAuthority,
    /// URL is missing required scheme (http)
    MissingScheme,
}

/// HTTP client error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// Request building failed
    #[error("Failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// Invalid header name
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Request timed out
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Transport error (network, connection, etc)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded size limit
    #[error("Response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// HTTP non-2xx status
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: http::StatusCode,
        body_preview: String,
        content_type: Option<String>,
    },

    /// Response body decoding error (JSON)
    #[error("JSON decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client overloaded (request buffer full, fail-fast)
    #[error("Client overloaded: request buffer full")]
    Overloaded,

    /// Internal client failure (buffer worker died, channel closed)
    #[error("Client unavailable: internal failure")]
    ServiceClosed,

    /// Invalid URL (failed to parse)
    ///
    /// Use the `kind` field for programmatic matching. The `reason` field contains
    /// a diagnostic message intended for logging only; do not match on its contents
    /// as the format is unstable and may change between releases.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUri {
        /// The URL that failed to parse
        url: String,
        /// Structured failure classification for programmatic matching
        kind: InvalidUriKind,
        /// Diagnostic message (unstable format, for logging only)
        reason: String,
    },

    /// Invalid URL scheme
    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    InvalidScheme {
        /// The URL scheme that was rejected
        scheme: String,
        /// Reason the scheme was rejected
        reason: String,
    },
}

impl HttpError {
    /// Short stable name for the failure category.
    ///
    /// Safe to embed in caller-facing strings: names the kind of failure
    /// without carrying addresses, payloads, or other transport detail.
    #[must_use]
    pub fn cause_name(&self) -> &'static str {
        match self {
            Self::RequestBuild(_) => "RequestBuild",
            Self::InvalidHeaderName(_) | Self::InvalidHeaderValue(_) => "InvalidHeader",
            Self::Timeout(_) => "Timeout",
            Self::Transport(_) => "Transport",
            Self::BodyTooLarge { .. } => "BodyTooLarge",
            Self::HttpStatus { .. } => "HttpStatus",
            Self::Decode(_) => "Decode",
            Self::Overloaded => "Overloaded",
            Self::ServiceClosed => "ServiceClosed",
            Self::InvalidUri { .. } => "InvalidUri",
            Self::InvalidScheme { .. } => "InvalidScheme",
        }
    }
}

impl From<hyper::Error> for HttpError {
    fn from(err: hyper::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}
