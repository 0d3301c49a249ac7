use axum::Json;
use axum::extract::{Path, State};
use svckit_errors::Problem;

use super::dto::{
    BucketsDto, HealthDto, ParameterDetailDto, ParametersDto, SERVICE_NAME, VersionDto,
};
use super::routes::AppState;

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
        service: SERVICE_NAME.to_owned(),
        version: state.version.clone(),
    })
}

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn version(State(state): State<AppState>) -> Json<VersionDto> {
    Json(VersionDto {
        service: SERVICE_NAME.to_owned(),
        version: state.version.clone(),
    })
}

pub async fn list_buckets(State(state): State<AppState>) -> Result<Json<BucketsDto>, Problem> {
    let buckets = state.buckets.list_buckets().await?;
    Ok(Json(buckets.into()))
}

pub async fn list_parameters(
    State(state): State<AppState>,
) -> Result<Json<ParametersDto>, Problem> {
    let parameters = state.parameters.list_parameters().await?;
    Ok(Json(parameters.into()))
}

pub async fn get_parameter(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ParameterDetailDto>, Problem> {
    let detail = state.parameters.get_parameter(&name).await?;
    Ok(Json(detail.into()))
}
