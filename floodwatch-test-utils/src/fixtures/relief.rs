//! Relief record database insertion utilities.
//!
//! Parent records are created on demand where the fixture takes names rather
//! than ids (districts for subdivisions). Id-based fixtures expect the parent
//! row to exist already.

use chrono::Utc;
use entity::sea_orm_active_enums::{
    CampStatus, FeedType, ProviderType, RequestStatus, RescueCameraStatus, ResourceStatus,
    ResourceType, WaterLevelCameraStatus,
};
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    error::TestError,
    model::{
        CampModel, DistrictModel, EmergencyRequestModel, RescueCameraModel, ResourceModel,
        SubdivisionModel, TeamMemberModel, TeamModel, WaterLevelCameraModel,
    },
    TestContext,
};

pub struct ReliefFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> ReliefFixtures<'a> {
    /// Insert a district, returning the existing row when the name is taken.
    pub async fn insert_district(&self, name: &str) -> Result<DistrictModel, TestError> {
        if let Some(existing) = entity::prelude::District::find()
            .filter(entity::district::Column::Name.eq(name))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::District::insert(entity::district::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a subdivision, creating its district if needed.
    pub async fn insert_subdivision(
        &self,
        district: &str,
        name: &str,
    ) -> Result<SubdivisionModel, TestError> {
        let district = self.insert_district(district).await?;

        Ok(
            entity::prelude::Subdivision::insert(entity::subdivision::ActiveModel {
                district_id: ActiveValue::Set(district.id),
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a team lead record.
    pub async fn insert_team(
        &self,
        full_name: &str,
        subdivision_id: i32,
    ) -> Result<TeamModel, TestError> {
        Ok(
            entity::prelude::Team::insert(entity::team::ActiveModel {
                full_name: ActiveValue::Set(full_name.to_string()),
                phone_number: ActiveValue::Set("9447000000".to_string()),
                alternate_phone: ActiveValue::Set(None),
                designation: ActiveValue::Set("Fire and Rescue".to_string()),
                subdivision_id: ActiveValue::Set(subdivision_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a member belonging to an existing team.
    pub async fn insert_team_member(
        &self,
        team_lead_id: i32,
        full_name: &str,
    ) -> Result<TeamMemberModel, TestError> {
        Ok(
            entity::prelude::TeamMember::insert(entity::team_member::ActiveModel {
                team_lead_id: ActiveValue::Set(team_lead_id),
                full_name: ActiveValue::Set(full_name.to_string()),
                phone_number: ActiveValue::Set("9447000001".to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a pending emergency request.
    ///
    /// # Arguments
    /// - `location` - Free-text location
    /// - `coordinates` - Optional (latitude, longitude)
    /// - `subdivision_id` - Optional routing subdivision
    pub async fn insert_emergency(
        &self,
        location: &str,
        coordinates: Option<(f64, f64)>,
        subdivision_id: Option<i32>,
    ) -> Result<EmergencyRequestModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EmergencyRequest::insert(entity::emergency_request::ActiveModel {
                location: ActiveValue::Set(location.to_string()),
                description: ActiveValue::Set("Family stranded on the roof".to_string()),
                latitude: ActiveValue::Set(coordinates.map(|(lat, _)| lat)),
                longitude: ActiveValue::Set(coordinates.map(|(_, long)| long)),
                status: ActiveValue::Set(RequestStatus::Pending),
                contact_name: ActiveValue::Set(None),
                contact_phone: ActiveValue::Set(None),
                affected_people: ActiveValue::Set(None),
                water_depth: ActiveValue::Set(None),
                medical_needs: ActiveValue::Set(None),
                subdivision_id: ActiveValue::Set(subdivision_id),
                idempotency_key: ActiveValue::Set(None),
                assigned_team_id: ActiveValue::Set(None),
                assignment_status: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                resolved_at: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a camp; status is `full` when occupancy has reached capacity.
    pub async fn insert_camp(
        &self,
        subdivision_id: i32,
        name: &str,
        capacity: i32,
        current_occupancy: i32,
        coordinates: Option<(f64, f64)>,
    ) -> Result<CampModel, TestError> {
        let now = Utc::now().naive_utc();
        let status = if current_occupancy >= capacity {
            CampStatus::Full
        } else {
            CampStatus::Active
        };

        Ok(
            entity::prelude::Camp::insert(entity::camp::ActiveModel {
                team_lead_id: ActiveValue::Set(None),
                subdivision_id: ActiveValue::Set(subdivision_id),
                name: ActiveValue::Set(name.to_string()),
                location: ActiveValue::Set("Govt. LP School".to_string()),
                address: ActiveValue::Set("School Road".to_string()),
                latitude: ActiveValue::Set(coordinates.map(|(lat, _)| lat)),
                longitude: ActiveValue::Set(coordinates.map(|(_, long)| long)),
                capacity: ActiveValue::Set(capacity),
                current_occupancy: ActiveValue::Set(current_occupancy),
                status: ActiveValue::Set(status),
                contact_number: ActiveValue::Set("9400000001".to_string()),
                facilities: ActiveValue::Set(serde_json::json!(["Drinking water"])),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a food resource with a low threshold of 10.
    pub async fn insert_resource(
        &self,
        subdivision_id: i32,
        name: &str,
        quantity: i32,
        coordinates: Option<(f64, f64)>,
    ) -> Result<ResourceModel, TestError> {
        let now = Utc::now().naive_utc();
        let status = if quantity <= 0 {
            ResourceStatus::Unavailable
        } else if quantity <= 10 {
            ResourceStatus::Low
        } else {
            ResourceStatus::Available
        };

        Ok(
            entity::prelude::Resource::insert(entity::resource::ActiveModel {
                team_lead_id: ActiveValue::Set(None),
                subdivision_id: ActiveValue::Set(subdivision_id),
                name: ActiveValue::Set(name.to_string()),
                resource_type: ActiveValue::Set(ResourceType::Food),
                quantity: ActiveValue::Set(quantity),
                unit: ActiveValue::Set("kits".to_string()),
                low_threshold: ActiveValue::Set(10),
                provider_name: ActiveValue::Set("Town Supermarket".to_string()),
                provider_type: ActiveValue::Set(ProviderType::Shop),
                contact_number: ActiveValue::Set("9400000002".to_string()),
                location: ActiveValue::Set("Market Junction".to_string()),
                latitude: ActiveValue::Set(coordinates.map(|(lat, _)| lat)),
                longitude: ActiveValue::Set(coordinates.map(|(_, long)| long)),
                notes: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an online RTSP rescue camera.
    pub async fn insert_rescue_camera(
        &self,
        subdivision_id: i32,
        team_lead_id: Option<i32>,
    ) -> Result<RescueCameraModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::RescueCamera::insert(entity::rescue_camera::ActiveModel {
                team_lead_id: ActiveValue::Set(team_lead_id),
                subdivision_id: ActiveValue::Set(subdivision_id),
                location_name: ActiveValue::Set("Aluva Manappuram".to_string()),
                feed_type: ActiveValue::Set(FeedType::Rtsp),
                config: ActiveValue::Set(serde_json::json!({
                    "url": "rtsp://10.0.0.5:554/stream"
                })),
                status: ActiveValue::Set(RescueCameraStatus::Online),
                pending_delete_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an active water-level camera calibrated 0..=5000 mm with a 3000 mm threshold.
    pub async fn insert_water_level_camera(
        &self,
        name: &str,
    ) -> Result<WaterLevelCameraModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::WaterLevelCamera::insert(entity::water_level_camera::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                roi_x1: ActiveValue::Set(100),
                roi_y1: ActiveValue::Set(50),
                roi_x2: ActiveValue::Set(300),
                roi_y2: ActiveValue::Set(450),
                min_value: ActiveValue::Set(0),
                max_value: ActiveValue::Set(5000),
                threshold: ActiveValue::Set(3000),
                current_level: ActiveValue::Set(None),
                status: ActiveValue::Set(WaterLevelCameraStatus::Active),
                pending_delete_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
