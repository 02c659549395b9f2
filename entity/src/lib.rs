//! SeaORM entities for the Floodwatch relational store.

pub mod prelude;

pub mod camp;
pub mod district;
pub mod emergency_request;
pub mod rescue_assignment;
pub mod rescue_camera;
pub mod resource;
pub mod sea_orm_active_enums;
pub mod subdivision;
pub mod team;
pub mod team_member;
pub mod water_level_camera;
