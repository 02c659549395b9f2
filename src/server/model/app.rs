use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::server::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Advertised to dashboard clients as their re-fetch interval
    pub dashboard_refresh: Duration,
    /// How long a deleted camera can be restored
    pub camera_undo_window: chrono::Duration,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            dashboard_refresh: Duration::from_secs(config.dashboard_refresh_secs),
            camera_undo_window: chrono::Duration::seconds(config.camera_undo_window_secs),
        }
    }
}

/// State with default intervals, used by tests that only provide a database.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            dashboard_refresh: Duration::from_secs(Config::DEFAULT_DASHBOARD_REFRESH_SECS),
            camera_undo_window: chrono::Duration::seconds(
                Config::DEFAULT_CAMERA_UNDO_WINDOW_SECS,
            ),
        }
    }
}
