//! Fetch helpers for the Floodwatch HTTP API.
//!
//! Every helper returns [`ApiError`] on failure. Error bodies are parsed as [`ErrorDto`]
//! when possible so validation failures keep the field they name, letting forms show the
//! message next to the offending input.

#[cfg(feature = "web")]
use reqwasm::http::{Request, Response};
#[cfg(feature = "web")]
use serde::{de::DeserializeOwned, Serialize};

use crate::model::api::ErrorDto;
#[cfg(feature = "web")]
use crate::model::{
    dashboard::DashboardDto,
    emergency::{CreateEmergencyDto, EmergencyDto},
    map::MapDto,
    water_level::WaterLevelDto,
};

/// A failed request or a form input rejected before sending
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    /// The request field the message refers to
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Builds the error for a failed response from its parsed body, if any
    pub fn from_response(status: u16, body: Option<ErrorDto>) -> Self {
        match body {
            Some(ErrorDto { error, field }) => Self {
                message: error,
                field,
            },
            None => Self::new(format!("Request failed with status {}", status)),
        }
    }

    /// Whether this error belongs to `field`
    pub fn is_for(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({})", self.message, field),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Builds an API path with an optional `subdivision_id` query
pub fn scoped_path(path: &str, subdivision_id: Option<i32>) -> String {
    match subdivision_id {
        Some(id) => format!("{}?subdivision_id={}", path, id),
        None => path.to_string(),
    }
}

#[cfg(feature = "web")]
async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    match response.status() {
        200..=299 => response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(format!("Failed to parse response: {}", e))),
        status => Err(ApiError::from_response(
            status,
            response.json::<ErrorDto>().await.ok(),
        )),
    }
}

#[cfg(feature = "web")]
async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|e| ApiError::new(format!("Failed to send request: {}", e)))?;

    parse(response).await
}

#[cfg(feature = "web")]
async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    idempotency_key: Option<&str>,
) -> Result<T, ApiError> {
    let body = serde_json::to_string(body)
        .map_err(|e| ApiError::new(format!("Failed to encode request: {}", e)))?;

    let mut request = Request::post(path)
        .header("Content-Type", "application/json")
        .body(body);
    if let Some(key) = idempotency_key {
        request = request.header("Idempotency-Key", key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::new(format!("Failed to send request: {}", e)))?;

    parse(response).await
}

/// Submit an SOS request
///
/// The same `idempotency_key` must be reused when retrying a submission so the
/// server returns the original record instead of storing a duplicate.
#[cfg(feature = "web")]
pub async fn submit_emergency(
    dto: &CreateEmergencyDto,
    idempotency_key: &str,
) -> Result<EmergencyDto, ApiError> {
    post_json("/api/emergency", dto, Some(idempotency_key)).await
}

/// Mark an emergency request resolved
#[cfg(feature = "web")]
pub async fn resolve_emergency(id: i32) -> Result<EmergencyDto, ApiError> {
    post_json(&format!("/api/emergency/{}/resolve", id), &(), None).await
}

#[cfg(feature = "web")]
pub async fn get_dashboard(subdivision_id: Option<i32>) -> Result<DashboardDto, ApiError> {
    get_json(&scoped_path("/api/dashboard", subdivision_id)).await
}

#[cfg(feature = "web")]
pub async fn get_map(subdivision_id: Option<i32>) -> Result<MapDto, ApiError> {
    get_json(&scoped_path("/api/map", subdivision_id)).await
}

#[cfg(feature = "web")]
pub async fn get_water_levels() -> Result<Vec<WaterLevelDto>, ApiError> {
    get_json("/api/water-levels").await
}
