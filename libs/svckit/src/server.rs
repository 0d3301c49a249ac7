//! HTTP server plumbing: bind, trace, serve until cancelled.

use std::net::SocketAddr;

use axum::Router;
use tokio_util::sync::CancellationToken;

/// Parse a bind address from its configuration string.
///
/// # Errors
/// Returns an error if the string is not an `ip:port` socket address.
pub fn parse_bind_addr(bind_addr: &str) -> anyhow::Result<SocketAddr> {
    bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
}

/// Wrap a router with an `http_request` tracing span per request.
///
/// Status and latency are recorded once the response is produced.
#[must_use]
pub fn apply_trace_layer(router: Router) -> Router {
    use tower_http::trace::TraceLayer;
    use tracing::field::Empty;

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    let ms = latency.as_millis();
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", ms);
                },
            ),
    )
}

/// Bind the configured address and serve until the token is cancelled.
///
/// # Errors
/// Returns an error if the address is invalid, the bind fails, or the
/// server loop fails.
pub async fn serve(bind_addr: &str, router: Router, cancel: CancellationToken) -> anyhow::Result<()> {
    let addr = parse_bind_addr(bind_addr)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_on(listener, router, cancel).await
}

/// Serve on an already-bound listener until the token is cancelled.
///
/// Split from [`serve`] so callers can bind port 0 and discover the
/// assigned port before the server starts.
///
/// # Errors
/// Returns an error if the server loop fails.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", addr);

    // Graceful shutdown on cancel
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
