//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main floodwatch crate so fixtures and tests
//! read the same way on both sides.

pub type DistrictModel = entity::district::Model;
pub type SubdivisionModel = entity::subdivision::Model;
pub type TeamModel = entity::team::Model;
pub type TeamMemberModel = entity::team_member::Model;
pub type EmergencyRequestModel = entity::emergency_request::Model;
pub type RescueAssignmentModel = entity::rescue_assignment::Model;
pub type CampModel = entity::camp::Model;
pub type ResourceModel = entity::resource::Model;
pub type RescueCameraModel = entity::rescue_camera::Model;
pub type WaterLevelCameraModel = entity::water_level_camera::Model;
