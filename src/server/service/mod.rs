//! Service layer for business logic and orchestration.
//!
//! Services validate request input, derive computed fields, wrap multi-row writes in
//! transactions and convert rows into DTOs. Read paths and SOS intake run through
//! [`retry::RetryContext`] so transient connection failures are retried with backoff.

pub mod assignment;
pub mod camera;
pub mod camp;
pub mod dashboard;
pub mod emergency;
pub mod intake;
pub mod map;
pub mod resource;
pub mod retry;
pub mod status;
pub mod subdivision;
pub mod team;
pub mod validate;
pub mod water_level;
