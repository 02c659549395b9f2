//! Test fixture modules for database records.
//!
//! - `relief` - inserts relief records (subdivisions, teams, requests, camps, cameras)
//! - `factory` - builds in-memory models for pure-function unit tests

pub mod factory;
pub mod relief;

use crate::TestContext;

impl TestContext {
    pub fn relief(&self) -> relief::ReliefFixtures<'_> {
        relief::ReliefFixtures { setup: self }
    }
}
