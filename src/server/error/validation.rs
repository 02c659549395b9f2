use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Rejected request input.
///
/// `field` uses the request's JSON key (or header name) so the client can show the
/// message next to the matching input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!(field = %self.field, "{}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.message,
                field: Some(self.field.to_string()),
            }),
        )
            .into_response()
    }
}
