//! Reservoir levels for the dashboard's dam panel.
//!
//! Bulletin ingestion is not implemented; the levels below are served as a fixed
//! snapshot stamped with the time of the request.

use chrono::{NaiveDateTime, Utc};

use crate::model::water_level::WaterLevelDto;

/// Dam name, district, current level (m), full reservoir level (m), storage (%)
const DAMS: &[(&str, &str, f64, f64, f64)] = &[
    ("Idukki", "Idukki", 2325.5, 2403.0, 85.0),
    ("Mullaperiyar", "Idukki", 135.2, 142.0, 92.0),
    ("Idamalayar", "Ernakulam", 160.3, 169.0, 78.0),
    ("Kakki", "Pathanamthitta", 975.4, 981.5, 88.0),
    ("Banasura Sagar", "Wayanad", 772.1, 775.6, 81.0),
];

/// Current reservoir levels, all stamped `last_updated = now`
pub fn current_levels(now: NaiveDateTime) -> Vec<WaterLevelDto> {
    DAMS.iter()
        .map(
            |&(dam_name, district, current_level, full_reservoir_level, storage_percentage)| {
                WaterLevelDto {
                    dam_name: dam_name.to_string(),
                    district: district.to_string(),
                    current_level,
                    full_reservoir_level,
                    storage_percentage,
                    last_updated: now,
                }
            },
        )
        .collect()
}

/// [`current_levels`] stamped with the current time
pub fn latest() -> Vec<WaterLevelDto> {
    current_levels(Utc::now().naive_utc())
}
