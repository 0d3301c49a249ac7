//! Wire DTOs. Field names are camelCase per the public contract.

use serde::Serialize;

/// Service name reported in the locally-built payloads.
pub const SERVICE_NAME: &str = "main-api";

/// Universal response wrapper: every 200 body is one of these. The data
/// payload never goes out naked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: T,
    pub main_api_version: String,
    pub aux_service_version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionDto {
    pub service: &'static str,
}
