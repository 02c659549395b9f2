//! Server application core modules.
//!
//! All server-side functionality for Floodwatch: HTTP routing, request validation,
//! database access for emergency requests, camps, resources, teams and cameras, and the
//! background job that purges deleted cameras once their undo window has passed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
