//! Database model type aliases.
//!
//! Shorter names for the SeaORM models generated in the `entity` crate.

/// Administrative district.
pub type DistrictModel = entity::district::Model;

/// Subdivision of a district; the scope every dashboard query filters on.
pub type SubdivisionModel = entity::subdivision::Model;

/// Rescue team, identified by its team lead.
pub type TeamModel = entity::team::Model;

/// Member exclusively owned by a team.
pub type TeamMemberModel = entity::team_member::Model;

/// Citizen SOS submission.
///
/// # Fields (from `entity::emergency_request::Model`)
/// - `status` - `pending` until a responder resolves it
/// - `subdivision_id` - `None` for unrouted requests, shown on every dashboard
/// - `idempotency_key` - Client supplied key making re-submission safe
/// - `assigned_team_id` / `assignment_status` - Mirror of the active dispatch assignment
pub type EmergencyRequestModel = entity::emergency_request::Model;

/// Dispatch of an emergency request to a team.
pub type RescueAssignmentModel = entity::rescue_assignment::Model;

/// Relief camp. `status` is derived from occupancy, capacity and the manual closed flag.
pub type CampModel = entity::camp::Model;

/// Relief resource. `status` is derived from quantity and `low_threshold`.
pub type ResourceModel = entity::resource::Model;

/// Rescue camera feed configuration.
///
/// `pending_delete_at` is set while a delete can still be undone and holds the
/// time the purge job may remove the row.
pub type RescueCameraModel = entity::rescue_camera::Model;

/// Water-level camera calibration, with the same undo window semantics as
/// [`RescueCameraModel`].
pub type WaterLevelCameraModel = entity::water_level_camera::Model;
