use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum WaterDepth {
    Ankle,
    Knee,
    Waist,
    Chest,
    AboveHead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    PendingAcceptance,
    Accepted,
    Rejected,
    Completed,
}

/// SOS submission body.
///
/// Coordinates arrive as decimal strings straight from the form inputs and are
/// parsed server side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateEmergencyDto {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub affected_people: Option<i32>,
    pub water_depth: Option<WaterDepth>,
    pub medical_needs: Option<String>,
    pub subdivision_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct EmergencyDto {
    pub id: i32,
    pub location: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: RequestStatus,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub affected_people: Option<i32>,
    pub water_depth: Option<WaterDepth>,
    pub medical_needs: Option<String>,
    pub subdivision_id: Option<i32>,
    pub assigned_team_id: Option<i32>,
    pub assignment_status: Option<AssignmentStatus>,
    /// When the request was submitted
    pub timestamp: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct EmergencyFilter {
    /// Requests routed to this subdivision plus unrouted requests
    pub subdivision_id: Option<i32>,
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AssignEmergencyDto {
    pub team_lead_id: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AssignmentDto {
    pub id: i32,
    pub emergency_request_id: i32,
    pub team_lead_id: i32,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub assigned_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(feature = "server")]
mod convert {
    use entity::sea_orm_active_enums as db;

    use super::*;
    use crate::model::mirror_active_enum;

    mirror_active_enum!(RequestStatus, db::RequestStatus, [Pending, Resolved]);
    mirror_active_enum!(
        WaterDepth,
        db::WaterDepth,
        [Ankle, Knee, Waist, Chest, AboveHead]
    );
    mirror_active_enum!(
        AssignmentStatus,
        db::AssignmentStatus,
        [PendingAcceptance, Accepted, Rejected, Completed]
    );

    impl From<entity::emergency_request::Model> for EmergencyDto {
        fn from(model: entity::emergency_request::Model) -> Self {
            Self {
                id: model.id,
                location: model.location,
                description: model.description,
                latitude: model.latitude,
                longitude: model.longitude,
                status: model.status.into(),
                contact_name: model.contact_name,
                contact_phone: model.contact_phone,
                affected_people: model.affected_people,
                water_depth: model.water_depth.map(Into::into),
                medical_needs: model.medical_needs,
                subdivision_id: model.subdivision_id,
                assigned_team_id: model.assigned_team_id,
                assignment_status: model.assignment_status.map(Into::into),
                timestamp: model.created_at,
                updated_at: model.updated_at,
                resolved_at: model.resolved_at,
            }
        }
    }

    impl From<entity::rescue_assignment::Model> for AssignmentDto {
        fn from(model: entity::rescue_assignment::Model) -> Self {
            Self {
                id: model.id,
                emergency_request_id: model.emergency_request_id,
                team_lead_id: model.team_lead_id,
                status: model.status.into(),
                notes: model.notes,
                assigned_at: model.assigned_at,
                updated_at: model.updated_at,
            }
        }
    }
}
