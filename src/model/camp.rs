use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CampStatus {
    Active,
    Full,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CampDto {
    pub id: i32,
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub name: String,
    pub location: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub status: CampStatus,
    pub contact_number: String,
    pub facilities: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateCampDto {
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: i32,
    #[serde(default)]
    pub current_occupancy: i32,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub facilities: Vec<String>,
}

/// Partial camp update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UpdateCampDto {
    pub team_lead_id: Option<i32>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
    pub current_occupancy: Option<i32>,
    pub contact_number: Option<String>,
    pub facilities: Option<Vec<String>>,
}

/// Either an absolute occupancy or a signed change, never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct OccupancyUpdateDto {
    pub occupancy: Option<i32>,
    pub change: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CampStatusUpdateDto {
    pub closed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct CampFilter {
    pub subdivision_id: Option<i32>,
    pub status: Option<CampStatus>,
}

#[cfg(feature = "server")]
mod convert {
    use entity::sea_orm_active_enums as db;

    use super::*;
    use crate::{model::mirror_active_enum, server::error::Error};

    mirror_active_enum!(CampStatus, db::CampStatus, [Active, Full, Closed]);

    impl TryFrom<entity::camp::Model> for CampDto {
        type Error = Error;

        /// Fails when the stored facilities column is not a list of strings
        fn try_from(model: entity::camp::Model) -> Result<Self, Self::Error> {
            let facilities = serde_json::from_value(model.facilities).map_err(|e| {
                Error::InternalError(format!(
                    "Failed to decode facilities of camp ID {}: {}",
                    model.id, e
                ))
            })?;

            Ok(Self {
                id: model.id,
                team_lead_id: model.team_lead_id,
                subdivision_id: model.subdivision_id,
                name: model.name,
                location: model.location,
                address: model.address,
                latitude: model.latitude,
                longitude: model.longitude,
                capacity: model.capacity,
                current_occupancy: model.current_occupancy,
                status: model.status.into(),
                contact_number: model.contact_number,
                facilities,
                created_at: model.created_at,
                updated_at: model.updated_at,
            })
        }
    }
}
