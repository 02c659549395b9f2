pub use sea_orm_migration::prelude::*;

mod m20261017_000001_district;
mod m20261017_000002_subdivision;
mod m20261017_000003_team;
mod m20261017_000004_team_member;
mod m20261017_000005_emergency_request;
mod m20261017_000006_rescue_assignment;
mod m20261017_000007_camp;
mod m20261017_000008_resource;
mod m20261017_000009_rescue_camera;
mod m20261017_000010_water_level_camera;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261017_000001_district::Migration),
            Box::new(m20261017_000002_subdivision::Migration),
            Box::new(m20261017_000003_team::Migration),
            Box::new(m20261017_000004_team_member::Migration),
            Box::new(m20261017_000005_emergency_request::Migration),
            Box::new(m20261017_000006_rescue_assignment::Migration),
            Box::new(m20261017_000007_camp::Migration),
            Box::new(m20261017_000008_resource::Migration),
            Box::new(m20261017_000009_rescue_camera::Migration),
            Box::new(m20261017_000010_water_level_camera::Migration),
        ]
    }
}
