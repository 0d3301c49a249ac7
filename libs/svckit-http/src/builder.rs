use crate::config::HttpClientConfig;
use crate::error::HttpError;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::Response;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;
use tower::buffer::Buffer;
use tower::timeout::TimeoutLayer;
use tower::{ServiceBuilder, ServiceExt};

/// Builder for constructing an [`HttpClient`](crate::HttpClient) with a
/// layered tower middleware stack.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Create a builder with a specific configuration
    #[must_use]
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Set the per-request timeout
    ///
    /// This timeout applies to each individual HTTP request. There are no
    /// retries: when the timeout elapses the caller sees
    /// `HttpError::Timeout` and decides what to do.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set the buffer capacity for concurrent request handling
    ///
    /// The HTTP client uses an internal buffer to allow concurrent requests
    /// without external locking. This sets the maximum number of requests
    /// that can be queued.
    ///
    /// **Note**: A capacity of 0 is invalid and will be clamped to 1.
    /// Tower's Buffer panics with capacity=0, so we enforce minimum of 1.
    #[must_use]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        // Clamp to at least 1 - tower::Buffer panics with capacity=0
        self.config.buffer_capacity = capacity.max(1);
        self
    }

    /// Set the idle connection timeout for the connection pool
    ///
    /// Connections that remain idle for longer than this duration will be
    /// closed and removed from the pool. Default: 90 seconds.
    ///
    /// Set to `None` to disable idle timeout (connections kept indefinitely).
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum number of idle connections per host
    ///
    /// Limits how many idle connections are kept in the pool for each host.
    /// Default: 32.
    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Build the HTTP client with all configured layers
    ///
    /// Must be called within a Tokio runtime: the buffer spawns its worker
    /// task at build time.
    ///
    /// # Errors
    /// Returns an error if the configured user agent is not a valid header value.
    pub fn build(self) -> Result<crate::HttpClient, HttpError> {
        let timeout = self.config.request_timeout;

        // Parse user agent header once (may fail); injected per request
        // unless the caller supplied their own.
        let user_agent = http::header::HeaderValue::try_from(self.config.user_agent.as_str())?;

        // Create the base hyper client with connection pool settings.
        // CRITICAL: pool_timer is required for pool_idle_timeout to work!
        let mut client_builder = Client::builder(TokioExecutor::new());
        client_builder
            .pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);

        // Set idle timeout (None = no timeout, connections kept indefinitely)
        if let Some(idle_timeout) = self.config.pool_idle_timeout {
            client_builder.pool_idle_timeout(idle_timeout);
        }

        let hyper_client = client_builder.build::<_, Full<Bytes>>(HttpConnector::new());

        // =======================================================================
        // Tower Layer Stack (outer to inner)
        //
        // Request flow:  Buffer -> ErrorMapping -> Timeout -> hyper_client
        // Response flow: hyper_client -> Timeout -> ErrorMapping -> Buffer
        //
        // Key semantics (reqwest-like):
        //   - send() returns Ok(Response) for ALL HTTP statuses (including 4xx/5xx)
        //   - send() returns Err only for transport/timeout errors
        //   - Non-2xx converted to error ONLY via error_for_status()
        // =======================================================================
        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(timeout))
            .service(hyper_client);

        // Box the hyper body so the response type doesn't leak connector types
        let service = service.map_response(map_boxed_body_response);

        // Map errors to HttpError with proper timeout duration
        let service = service.map_err(move |e: tower::BoxError| map_tower_error(e, timeout));

        let boxed_service = service.boxed_clone();

        // Wrap in Buffer as the final step for true concurrent access.
        // Buffer spawns a background task that processes requests from a
        // channel, providing Clone + Send + Sync without mutex serialization.
        // The worker exits when the last handle is dropped, which closes the
        // connection pool with it.
        let buffer_capacity = self.config.buffer_capacity.max(1);
        let buffered_service: crate::client::BufferedService =
            Buffer::new(boxed_service, buffer_capacity);

        Ok(crate::HttpClient {
            service: buffered_service,
            max_body_size: self.config.max_body_size,
            user_agent,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map tower errors to `HttpError` with actual timeout duration
///
/// Attempts to extract existing `HttpError` from the boxed error before
/// wrapping as `Transport`. This preserves typed errors like `Overloaded`
/// and `ServiceClosed` that may have been boxed by tower middleware.
fn map_tower_error(err: tower::BoxError, timeout: Duration) -> HttpError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return HttpError::Timeout(timeout);
    }

    // Try to extract existing HttpError before wrapping as Transport
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(other) => HttpError::Transport(other),
    }
}

/// Box the response body with appropriate error type mapping.
///
/// Converts `Response<Incoming>` from hyper to `Response<ResponseBody>`.
fn map_boxed_body_response<B>(response: Response<B>) -> Response<ResponseBody>
where
    B: hyper::body::Body<Data = Bytes> + Send + Sync + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = response.into_parts();
    let boxed_body: ResponseBody = body.map_err(Into::into).boxed();
    Response::from_parts(parts, boxed_body)
}
