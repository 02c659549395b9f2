//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extractors built by hand, verifying status codes,
//! response bodies and error mapping for every API area.

mod assignment;
mod camera;
mod camp;
mod dashboard;
mod emergency;
mod resource;
mod team;

use floodwatch_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};
