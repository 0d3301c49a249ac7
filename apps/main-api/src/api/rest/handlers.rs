use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use svckit_errors::Problem;

use crate::domain::service::Gateway;

use super::dto::{Envelope, HealthDto, SERVICE_NAME, VersionDto};

/// Attach both versions to a payload. Runs the enrichment call; its
/// failure never aborts the response being built.
async fn wrap<T>(gateway: &Gateway, data: T) -> Envelope<T> {
    Envelope {
        data,
        main_api_version: gateway.version().to_owned(),
        aux_service_version: gateway.aux_version().await.into_wire(),
    }
}

pub async fn health(State(gateway): State<Arc<Gateway>>) -> Json<Envelope<HealthDto>> {
    let data = HealthDto {
        status: "ok",
        service: SERVICE_NAME,
    };
    Json(wrap(&gateway, data).await)
}

pub async fn version(State(gateway): State<Arc<Gateway>>) -> Json<Envelope<VersionDto>> {
    let data = VersionDto {
        service: SERVICE_NAME,
    };
    Json(wrap(&gateway, data).await)
}

pub async fn list_buckets(
    State(gateway): State<Arc<Gateway>>,
) -> Result<Json<Envelope<Value>>, Problem> {
    let data = gateway.proxy_get("/aws/buckets").await?;
    Ok(Json(wrap(&gateway, data).await))
}

pub async fn list_parameters(
    State(gateway): State<Arc<Gateway>>,
) -> Result<Json<Envelope<Value>>, Problem> {
    let data = gateway.proxy_get("/aws/parameters").await?;
    Ok(Json(wrap(&gateway, data).await))
}

pub async fn get_parameter(
    State(gateway): State<Arc<Gateway>>,
    Path(name): Path<String>,
) -> Result<Json<Envelope<Value>>, Problem> {
    let data = gateway.proxy_get(&format!("/aws/parameters/{name}")).await?;
    Ok(Json(wrap(&gateway, data).await))
}
