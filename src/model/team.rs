use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TeamMemberDto {
    pub id: i32,
    pub team_lead_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
}

/// A team lead together with the members they own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TeamDto {
    pub id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub designation: String,
    pub subdivision_id: i32,
    pub created_at: NaiveDateTime,
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateTeamMemberDto {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateTeamDto {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    #[serde(default)]
    pub designation: String,
    pub subdivision_id: i32,
    #[serde(default)]
    pub members: Vec<CreateTeamMemberDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct TeamFilter {
    pub subdivision_id: Option<i32>,
}

#[cfg(feature = "server")]
impl From<entity::team_member::Model> for TeamMemberDto {
    fn from(model: entity::team_member::Model) -> Self {
        Self {
            id: model.id,
            team_lead_id: model.team_lead_id,
            full_name: model.full_name,
            phone_number: model.phone_number,
            created_at: model.created_at,
        }
    }
}

#[cfg(feature = "server")]
impl From<(entity::team::Model, Vec<entity::team_member::Model>)> for TeamDto {
    fn from((team, members): (entity::team::Model, Vec<entity::team_member::Model>)) -> Self {
        Self {
            id: team.id,
            full_name: team.full_name,
            phone_number: team.phone_number,
            alternate_phone: team.alternate_phone,
            designation: team.designation,
            subdivision_id: team.subdivision_id,
            created_at: team.created_at,
            members: members.into_iter().map(TeamMemberDto::from).collect(),
        }
    }
}
