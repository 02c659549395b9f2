//! Declarative test builder.
//!
//! `TestBuilder` queues tables and database fixtures, then creates them all in
//! one `build()` call. Fixture ids are assigned by SQLite in queue order, so the
//! first subdivision queued gets id 1, the first team gets id 1, and so on.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, setup::relief_tables, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_relief_tables: bool,

    // Database fixtures to insert
    subdivisions: Vec<(String, String)>, // (district, subdivision)
    teams: Vec<(String, i32)>,           // (full_name, subdivision_id)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_relief_tables: false,
            subdivisions: Vec::new(),
            teams: Vec::new(),
        }
    }

    /// Add every relief table to the test database.
    ///
    /// Creates District, Subdivision, Team, TeamMember, EmergencyRequest,
    /// RescueAssignment, Camp, Resource, RescueCamera and WaterLevelCamera.
    pub fn with_relief_tables(mut self) -> Self {
        self.include_relief_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use floodwatch_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), floodwatch_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(WaterLevelCamera)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a subdivision (and its district, if new) into the database.
    ///
    /// # Arguments
    /// - `district` - District name, created on first use
    /// - `subdivision` - Subdivision name
    pub fn with_subdivision(
        mut self,
        district: impl Into<String>,
        subdivision: impl Into<String>,
    ) -> Self {
        self.subdivisions
            .push((district.into(), subdivision.into()));
        self
    }

    /// Insert a team lead record scoped to a subdivision.
    ///
    /// The subdivision must already be queued with `with_subdivision`.
    pub fn with_team(mut self, full_name: impl Into<String>, subdivision_id: i32) -> Self {
        self.teams.push((full_name.into(), subdivision_id));
        self
    }

    /// Build the test context by creating all configured tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_relief_tables {
            all_tables.extend(relief_tables());
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (district, subdivision) in self.subdivisions {
            setup
                .relief()
                .insert_subdivision(&district, &subdivision)
                .await?;
        }

        for (full_name, subdivision_id) in self.teams {
            setup.relief().insert_team(&full_name, subdivision_id).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_creates_relief_tables() {
        let result = TestBuilder::new().with_relief_tables().build().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_builder_chains_fixtures() {
        let result = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .with_subdivision("Ernakulam", "Kochi")
            .with_team("Anil Kumar", 2)
            .build()
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_builder_fails_for_team_without_tables() {
        let result = TestBuilder::new().with_team("Anil Kumar", 1).build().await;
        assert!(result.is_err());
    }
}
