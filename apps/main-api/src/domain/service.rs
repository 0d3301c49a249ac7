//! The gateway core: proxying and version enrichment.

use svckit_http::{HttpClient, HttpError};

use super::error::GatewayError;

/// The facade's version as seen by the enrichment call.
///
/// Modeled as a degraded-result type rather than an error swallow so the
/// difference between a real version and the sentinel stays explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxVersion {
    /// The facade reported its version.
    Reported(String),
    /// The enrichment call failed; carries the stable failure-category
    /// name, never transport detail.
    Unreachable(&'static str),
}

impl AuxVersion {
    /// Render the wire value: the version itself, or the sentinel.
    #[must_use]
    pub fn into_wire(self) -> String {
        match self {
            Self::Reported(version) => version,
            Self::Unreachable(cause) => format!("unreachable ({cause})"),
        }
    }
}

/// Stateless request pipeline around the one process-wide HTTP client.
///
/// Constructed once at startup and shared by every handler; the pooled
/// client inside is internally synchronized, so no locking is needed.
/// Dropping the last handle (when the serve loop finishes draining)
/// releases the pool exactly once.
pub struct Gateway {
    http: HttpClient,
    aux_base_url: String,
    version: String,
}

impl Gateway {
    pub fn new(
        http: HttpClient,
        aux_base_url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let mut aux_base_url = aux_base_url.into();
        while aux_base_url.ends_with('/') {
            aux_base_url.pop();
        }
        Self {
            http,
            aux_base_url,
            version: version.into(),
        }
    }

    /// The gateway's own version, attached to every envelope.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// GET a facade path and return its JSON payload.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::UpstreamStatus`] when the facade answered non-2xx:
    ///   its status and body are carried through untouched.
    /// - [`GatewayError::Unreachable`] when no usable response was obtained
    ///   (timeout, connect failure, undecodable body).
    pub async fn proxy_get(&self, path: &str) -> Result<serde_json::Value, GatewayError> {
        let url = format!("{}{path}", self.aux_base_url);
        tracing::debug!(%url, "Calling aux-service");

        let response = self.http.get(&url).send().await.map_err(|err| {
            tracing::error!(error = %err, %url, "Failed to reach aux-service");
            GatewayError::Unreachable {
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|err| GatewayError::Unreachable {
                    message: err.to_string(),
                })?;
            tracing::error!(%status, %url, "aux-service returned error");
            return Err(GatewayError::UpstreamStatus { status, body });
        }

        response.json().await.map_err(|err| {
            tracing::error!(error = %err, %url, "Failed to decode aux-service payload");
            GatewayError::Unreachable {
                message: err.to_string(),
            }
        })
    }

    /// Fetch the facade's self-reported version, absorbing every failure
    /// into the sentinel. Never escalates into the primary response.
    pub async fn aux_version(&self) -> AuxVersion {
        match self.fetch_version().await {
            Ok(version) => AuxVersion::Reported(version),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to get aux-service version");
                AuxVersion::Unreachable(err.cause_name())
            }
        }
    }

    async fn fetch_version(&self) -> Result<String, HttpError> {
        let url = format!("{}/version", self.aux_base_url);
        let body: serde_json::Value = self.http.get(&url).send().await?.json().await?;
        Ok(body
            .get("version")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown")
            .to_owned())
    }
}
