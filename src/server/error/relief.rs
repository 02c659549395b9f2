use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum ReliefError {
    #[error("{record} ID {id} not found")]
    NotFound { record: &'static str, id: i32 },
    #[error("Cannot {action} {record} ID {id} while it is {state}")]
    InvalidTransition {
        record: &'static str,
        id: i32,
        action: &'static str,
        state: String,
    },
}

impl IntoResponse for ReliefError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
                field: None,
            }),
        )
            .into_response()
    }
}
