use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Food,
    Clothing,
    Transport,
    Medical,
    Shelter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Available,
    Low,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Shop,
    Industry,
    Company,
    Individual,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResourceDto {
    pub id: i32,
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub quantity: i32,
    pub unit: String,
    pub low_threshold: i32,
    pub provider_name: String,
    pub provider_type: ProviderType,
    pub contact_number: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub status: ResourceStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateResourceDto {
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub quantity: i32,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub low_threshold: i32,
    #[serde(default)]
    pub provider_name: String,
    pub provider_type: ProviderType,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// Partial resource update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UpdateResourceDto {
    pub team_lead_id: Option<i32>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub low_threshold: Option<i32>,
    pub provider_name: Option<String>,
    pub provider_type: Option<ProviderType>,
    pub contact_number: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ResourceFilter {
    pub subdivision_id: Option<i32>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub status: Option<ResourceStatus>,
}

#[cfg(feature = "server")]
mod convert {
    use entity::sea_orm_active_enums as db;

    use super::*;
    use crate::model::mirror_active_enum;

    mirror_active_enum!(
        ResourceType,
        db::ResourceType,
        [Food, Clothing, Transport, Medical, Shelter, Other]
    );
    mirror_active_enum!(
        ResourceStatus,
        db::ResourceStatus,
        [Available, Low, Unavailable]
    );
    mirror_active_enum!(
        ProviderType,
        db::ProviderType,
        [Shop, Industry, Company, Individual, Other]
    );

    impl From<entity::resource::Model> for ResourceDto {
        fn from(model: entity::resource::Model) -> Self {
            Self {
                id: model.id,
                team_lead_id: model.team_lead_id,
                subdivision_id: model.subdivision_id,
                name: model.name,
                resource_type: model.resource_type.into(),
                quantity: model.quantity,
                unit: model.unit,
                low_threshold: model.low_threshold,
                provider_name: model.provider_name,
                provider_type: model.provider_type.into(),
                contact_number: model.contact_number,
                location: model.location,
                latitude: model.latitude,
                longitude: model.longitude,
                notes: model.notes,
                status: model.status.into(),
                created_at: model.created_at,
                updated_at: model.updated_at,
            }
        }
    }
}
