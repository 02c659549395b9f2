//! Repositories over the relief tables.
//!
//! Each repository borrows any `ConnectionTrait` so the same code runs against the
//! pooled connection or inside a transaction. Repositories only read and write rows;
//! validation and derived fields are the service layer's concern.

pub mod assignment;
pub mod camera;
pub mod camp;
pub mod emergency;
pub mod resource;
pub mod subdivision;
pub mod team;
