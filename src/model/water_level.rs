use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reservoir level as published in the daily dam bulletin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WaterLevelDto {
    pub dam_name: String,
    pub district: String,
    /// Metres above sea level
    pub current_level: f64,
    pub full_reservoir_level: f64,
    pub storage_percentage: f64,
    pub last_updated: NaiveDateTime,
}
