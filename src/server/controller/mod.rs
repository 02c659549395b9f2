//! HTTP controller endpoints for the Floodwatch web API.
//!
//! Axum handlers that extract request input, call into the service layer and map the
//! result onto a status code and JSON body. Every handler is documented with utoipa and
//! registered in [`crate::server::router`].

pub mod assignment;
pub mod camera;
pub mod camp;
pub mod dashboard;
pub mod emergency;
pub mod reference;
pub mod resource;
pub mod team;
