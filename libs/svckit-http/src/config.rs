use std::time::Duration;

/// Default User-Agent string for HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("svckit-http/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`crate::HttpClient`].
///
/// All values have production-ready defaults; construct via
/// [`crate::HttpClientBuilder`] for the fluent API.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout (default: 30 seconds)
    ///
    /// Applies to each request end to end, including connection setup.
    /// On expiry the call fails with [`crate::HttpError::Timeout`].
    pub request_timeout: Duration,

    /// Maximum response body size in bytes (default: 10 MB)
    pub max_body_size: usize,

    /// User-Agent header value, injected when the caller does not set one
    pub user_agent: String,

    /// Buffer capacity for concurrent request handling (default: 1024)
    ///
    /// The client uses an internal buffer to allow multiple concurrent
    /// requests without external locking. This sets the maximum number of
    /// requests that can be queued waiting for processing.
    pub buffer_capacity: usize,

    /// Timeout for idle connections in the pool (default: 90 seconds)
    ///
    /// Connections that remain idle for longer than this duration are
    /// closed and removed from the pool.
    ///
    /// Set to `None` to use hyper-util's default idle timeout.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum number of idle connections per host (default: 32)
    ///
    /// Setting this to `0` disables connection reuse entirely.
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 10 * 1024 * 1024, // 10 MB
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            buffer_capacity: 1024,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
        }
    }
}
