use crate::client::{BufferedService, map_buffer_error, try_acquire_buffer_slot};
use crate::error::{HttpError, InvalidUriKind};
use crate::response::{HttpResponse, ResponseBody};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use tower::Service;

/// HTTP request builder with fluent API
///
/// Created by [`HttpClient::get`](crate::HttpClient::get). Supports chaining
/// headers before sending with [`send()`](RequestBuilder::send).
///
/// # URL Construction
///
/// This crate does **not** provide query-string composition. Build your URL
/// externally (e.g. via `url::Url`) and pass the final string to `HttpClient`:
///
/// ```ignore
/// use url::Url;
/// use svckit_http::HttpClient;
///
/// let mut url = Url::parse("http://aux.internal:8000/aws/parameters")?;
/// url.query_pairs_mut().append_pair("page", "1");
///
/// let client = HttpClient::builder().build()?;
/// let resp = client.get(url.as_str()).send().await?;
/// ```
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    service: BufferedService,
    max_body_size: usize,
    url: String,
    user_agent: http::header::HeaderValue,
    headers: Vec<(http::header::HeaderName, http::header::HeaderValue)>,
    /// Error captured during building (deferred to `send()`)
    error: Option<HttpError>,
}

impl RequestBuilder {
    /// Create a new request builder (internal use only)
    pub(crate) fn new(
        service: BufferedService,
        max_body_size: usize,
        url: String,
        user_agent: http::header::HeaderValue,
    ) -> Self {
        Self {
            service,
            max_body_size,
            url,
            user_agent,
            headers: Vec::new(),
            error: None,
        }
    }

    /// Add a single header to the request
    ///
    /// Invalid names or values are deferred and reported by `send()`.
    ///
    /// ```ignore
    /// let resp = client
    ///     .get("http://aux.internal:8000/version")
    ///     .header("x-request-id", "abc123")
    ///     .send()
    ///     .await?;
    /// ```
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }

        match (
            http::header::HeaderName::try_from(name),
            http::header::HeaderValue::try_from(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.push((name, value));
            }
            (Err(e), _) => {
                self.error = Some(HttpError::InvalidHeaderName(e));
            }
            (_, Err(e)) => {
                self.error = Some(HttpError::InvalidHeaderValue(e));
            }
        }
        self
    }

    /// Send the request and return the response
    ///
    /// Note that a non-2xx response is NOT an error here; check the status
    /// via [`HttpResponse::status`](crate::HttpResponse::status) or
    /// [`error_for_status`](crate::HttpResponse::error_for_status).
    ///
    /// # Errors
    ///
    /// Returns `HttpError` if:
    /// - Request building failed (invalid headers, URL, etc.)
    /// - URL scheme is not plain http
    /// - Network/transport error
    /// - Request timeout
    /// - Concurrency limit reached (`Overloaded`)
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        // Return any deferred error
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let uri = validate_url(&self.url)?;

        let mut builder = Request::builder().method(http::Method::GET).uri(uri);

        // Inject the configured User-Agent only if caller didn't supply one.
        // The http builder appends headers rather than replacing, so skipping
        // the default here is what prevents duplicates.
        let has_user_agent = self
            .headers
            .iter()
            .any(|(name, _)| name == http::header::USER_AGENT);
        if !has_user_agent {
            builder = builder.header(http::header::USER_AGENT, self.user_agent);
        }

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        let request = builder.body(Full::new(Bytes::new()))?;

        // Fail-fast if buffer is full
        try_acquire_buffer_slot(&mut self.service).await?;

        let inner: Response<ResponseBody> =
            self.service.call(request).await.map_err(map_buffer_error)?;

        Ok(HttpResponse {
            inner,
            max_body_size: self.max_body_size,
        })
    }
}

/// Validate the URL and require the plain http scheme.
///
/// This client carries no TLS connector, so anything but `http://` would
/// only surface later as a confusing connect failure. Uses proper
/// `http::Uri` parsing instead of string prefix matching.
fn validate_url(url: &str) -> Result<http::Uri, HttpError> {
    let uri: http::Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::ParseError,
            reason: e.to_string(),
        })?;

    // Require authority (host) for absolute URLs
    if uri.authority().is_none() {
        return Err(HttpError::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::MissingAuthority,
            reason: "missing host/authority".to_owned(),
        });
    }

    match uri.scheme_str() {
        Some("http") => Ok(uri),
        Some(scheme) => Err(HttpError::InvalidScheme {
            scheme: scheme.to_owned(),
            reason: "only the http:// scheme is supported (no TLS connector)".to_owned(),
        }),
        None => Err(HttpError::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::MissingScheme,
            reason: "missing scheme".to_owned(),
        }),
    }
}
