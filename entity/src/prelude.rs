pub use super::camp::Entity as Camp;
pub use super::district::Entity as District;
pub use super::emergency_request::Entity as EmergencyRequest;
pub use super::rescue_assignment::Entity as RescueAssignment;
pub use super::rescue_camera::Entity as RescueCamera;
pub use super::resource::Entity as Resource;
pub use super::subdivision::Entity as Subdivision;
pub use super::team::Entity as Team;
pub use super::team_member::Entity as TeamMember;
pub use super::water_level_camera::Entity as WaterLevelCamera;
