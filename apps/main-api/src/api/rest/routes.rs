use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::domain::service::Gateway;

use super::handlers;

/// Build the gateway router. Every handler borrows the one shared
/// [`Gateway`]; nothing is constructed per request.
#[must_use]
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/buckets", get(handlers::list_buckets))
        .route("/parameters", get(handlers::list_parameters))
        .route("/parameters/{*name}", get(handlers::get_parameter))
        .with_state(gateway)
}
