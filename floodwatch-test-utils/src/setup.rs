use sea_orm::{sea_query::TableCreateStatement, DbBackend, Schema};

/// CREATE TABLE statements for every relief table, ordered so foreign keys resolve.
pub fn relief_tables() -> Vec<TableCreateStatement> {
    let schema = Schema::new(DbBackend::Sqlite);

    vec![
        schema.create_table_from_entity(entity::prelude::District),
        schema.create_table_from_entity(entity::prelude::Subdivision),
        schema.create_table_from_entity(entity::prelude::Team),
        schema.create_table_from_entity(entity::prelude::TeamMember),
        schema.create_table_from_entity(entity::prelude::EmergencyRequest),
        schema.create_table_from_entity(entity::prelude::RescueAssignment),
        schema.create_table_from_entity(entity::prelude::Camp),
        schema.create_table_from_entity(entity::prelude::Resource),
        schema.create_table_from_entity(entity::prelude::RescueCamera),
        schema.create_table_from_entity(entity::prelude::WaterLevelCamera),
    ]
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestContext::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_relief_tables {
    () => {{
        async {
            let setup = $crate::TestContext::new().await?;
            setup.with_tables($crate::setup::relief_tables()).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};
}
