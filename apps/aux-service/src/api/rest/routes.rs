use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::domain::ports::{BucketStore, ParameterStore};

use super::handlers;

/// Shared state injected into every handler. Cheap to clone; the stores
/// are constructed once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub buckets: Arc<dyn BucketStore>,
    pub parameters: Arc<dyn ParameterStore>,
    pub version: String,
}

/// Build the facade router.
///
/// The parameter route uses a wildcard tail so hierarchical names like
/// `/app/db` (leading slash included) resolve to one handler.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/aws/buckets", get(handlers::list_buckets))
        .route("/aws/parameters", get(handlers::list_parameters))
        .route("/aws/parameters/{*name}", get(handlers::get_parameter))
        .with_state(state)
}
