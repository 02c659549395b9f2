//! Factory functions for in-memory relief models.
//!
//! No database interaction; suitable for unit tests of pure functions.

use chrono::Utc;
use entity::sea_orm_active_enums::{
    CampStatus, ProviderType, RequestStatus, ResourceStatus, ResourceType,
};

use crate::model::{CampModel, EmergencyRequestModel, ResourceModel};

/// Create a pending emergency request model.
///
/// # Arguments
/// - `id` - Record id
/// - `location` - Free-text location
/// - `coordinates` - Optional (latitude, longitude)
pub fn mock_emergency_model(
    id: i32,
    location: &str,
    coordinates: Option<(f64, f64)>,
) -> EmergencyRequestModel {
    let now = Utc::now().naive_utc();
    EmergencyRequestModel {
        id,
        location: location.to_string(),
        description: "Water rising inside the house".to_string(),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, long)| long),
        status: RequestStatus::Pending,
        contact_name: Some("Test Caller".to_string()),
        contact_phone: Some("9400000000".to_string()),
        affected_people: Some(4),
        water_depth: None,
        medical_needs: None,
        subdivision_id: None,
        idempotency_key: None,
        assigned_team_id: None,
        assignment_status: None,
        created_at: now,
        updated_at: now,
        resolved_at: None,
    }
}

/// Create an active camp model with 100 capacity and 10 occupants.
pub fn mock_camp_model(id: i32, name: &str, coordinates: Option<(f64, f64)>) -> CampModel {
    let now = Utc::now().naive_utc();
    CampModel {
        id,
        team_lead_id: None,
        subdivision_id: 1,
        name: name.to_string(),
        location: "Govt. LP School".to_string(),
        address: "School Road".to_string(),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, long)| long),
        capacity: 100,
        current_occupancy: 10,
        status: CampStatus::Active,
        contact_number: "9400000001".to_string(),
        facilities: serde_json::json!(["Drinking water", "Medical aid"]),
        created_at: now,
        updated_at: now,
    }
}

/// Create an available food resource model with 50 units.
pub fn mock_resource_model(id: i32, name: &str, coordinates: Option<(f64, f64)>) -> ResourceModel {
    let now = Utc::now().naive_utc();
    ResourceModel {
        id,
        team_lead_id: None,
        subdivision_id: 1,
        name: name.to_string(),
        resource_type: ResourceType::Food,
        quantity: 50,
        unit: "kits".to_string(),
        low_threshold: 10,
        provider_name: "Town Supermarket".to_string(),
        provider_type: ProviderType::Shop,
        contact_number: "9400000002".to_string(),
        location: "Market Junction".to_string(),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, long)| long),
        notes: None,
        status: ResourceStatus::Available,
        created_at: now,
        updated_at: now,
    }
}
