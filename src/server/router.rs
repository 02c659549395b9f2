//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa annotation. The
//! collected OpenAPI document is served at `/api/docs/openapi.json` with Swagger UI at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are grouped into a single `routes!` call so utoipa-axum
/// registers them as one method router.
///
/// # Returns
/// An Axum `Router<AppState>` ready to be given state and merged into the main
/// application router.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::new(db, &config));
/// ```
pub fn routes() -> Router<AppState> {
    use controller::{assignment, camera, camp, dashboard, emergency, reference, resource, team};

    #[derive(OpenApi)]
    #[openapi(info(title = "Floodwatch", description = "Flood emergency coordination API"), tags(
        (name = controller::emergency::EMERGENCY_TAG, description = "SOS intake, listing, resolution and dispatch"),
        (name = controller::assignment::ASSIGNMENT_TAG, description = "Rescue assignment lifecycle"),
        (name = controller::camp::CAMP_TAG, description = "Relief camp management"),
        (name = controller::resource::RESOURCE_TAG, description = "Relief resource management"),
        (name = controller::team::TEAM_TAG, description = "Rescue teams and members"),
        (name = controller::camera::CAMERA_TAG, description = "Rescue and water-level cameras"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Responder dashboard and situation map"),
        (name = controller::reference::REFERENCE_TAG, description = "Subdivisions and reservoir levels"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            emergency::submit_emergency,
            emergency::list_emergencies
        ))
        .routes(routes!(emergency::resolve_emergency))
        .routes(routes!(emergency::assign_emergency))
        .routes(routes!(assignment::accept_assignment))
        .routes(routes!(assignment::reject_assignment))
        .routes(routes!(assignment::complete_assignment))
        .routes(routes!(camp::list_camps, camp::create_camp))
        .routes(routes!(camp::update_camp, camp::delete_camp))
        .routes(routes!(camp::update_camp_occupancy))
        .routes(routes!(camp::update_camp_status))
        .routes(routes!(resource::list_resources, resource::create_resource))
        .routes(routes!(
            resource::update_resource,
            resource::delete_resource
        ))
        .routes(routes!(team::list_teams, team::create_team))
        .routes(routes!(team::delete_team))
        .routes(routes!(team::add_team_member))
        .routes(routes!(team::remove_team_member))
        .routes(routes!(team::list_team_assignments))
        .routes(routes!(
            camera::list_rescue_cameras,
            camera::create_rescue_camera
        ))
        .routes(routes!(
            camera::update_rescue_camera,
            camera::delete_rescue_camera
        ))
        .routes(routes!(camera::restore_rescue_camera))
        .routes(routes!(
            camera::list_water_level_cameras,
            camera::create_water_level_camera
        ))
        .routes(routes!(
            camera::update_water_level_camera,
            camera::delete_water_level_camera
        ))
        .routes(routes!(camera::record_water_level_reading))
        .routes(routes!(camera::restore_water_level_camera))
        .routes(routes!(dashboard::get_dashboard))
        .routes(routes!(dashboard::get_map))
        .routes(routes!(reference::list_subdivisions))
        .routes(routes!(reference::list_water_levels))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
