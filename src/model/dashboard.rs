use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{camp::CampDto, emergency::EmergencyDto, resource::ResourceDto};

/// Responder dashboard snapshot.
///
/// Clients re-fetch every `refresh_interval_secs`; a request submitted before
/// `fetched_at` is always contained in `emergencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DashboardDto {
    pub emergencies: Vec<EmergencyDto>,
    pub camps: Vec<CampDto>,
    pub resources: Vec<ResourceDto>,
    pub fetched_at: NaiveDateTime,
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct DashboardFilter {
    pub subdivision_id: Option<i32>,
}
