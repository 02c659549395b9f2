//! Error types for the Floodwatch server application.
//!
//! Domain errors (validation, missing records, illegal state transitions) carry their
//! own HTTP mapping; everything else collapses into a logged 500 response. All errors
//! implement `IntoResponse` for Axum and use `thiserror` for their `Display` output.

pub mod config;
pub mod relief;
pub mod retry;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, relief::ReliefError, validation::ValidationError},
};

/// Main error type for the Floodwatch server application.
///
/// Aggregates domain-specific error types and external library errors so service and
/// controller code can propagate everything with `?`.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Validation errors (rejected request input, names the offending field)
/// - Relief errors (missing records, illegal status transitions)
/// - External library errors (database, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Request input failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Record lookup or state transition error.
    #[error(transparent)]
    ReliefError(#[from] ReliefError),
    /// Internal error indicating a bug in Floodwatch's code.
    #[error("Internal error with Floodwatch's code, please open an issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures, with the offending field
/// - 404 Not Found - Missing records
/// - 409 Conflict - Illegal status transitions
/// - 500 Internal Server Error - Everything else (logged at error level)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::ReliefError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error message and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
                field: None,
            }),
        )
            .into_response()
    }
}
