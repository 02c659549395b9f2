//! Map overlay projection.
//!
//! [`project`] turns camps, unresolved requests and resources into markers. Records
//! without a usable coordinate pair are never guessed at: they are left off the map and
//! reported in the skipped list so the client can show how many are missing.

use dioxus_logger::tracing;
use entity::sea_orm_active_enums::{CampStatus, RequestStatus};
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::map::{MapDto, MapFilter, MapViewDto, MarkerDto, MarkerKind, SkippedRecordDto},
    server::{
        data::{
            camp::{CampFilter, CampRepository},
            emergency::{EmergencyRequestFilter, EmergencyRequestRepository},
            resource::{ResourceFilter, ResourceRepository},
        },
        error::Error,
        model::db::{CampModel, EmergencyRequestModel, ResourceModel},
        service::retry::RetryContext,
    },
};

/// Initial map view centred on Kerala
pub const DEFAULT_VIEW: MapViewDto = MapViewDto {
    latitude: 10.8505,
    longitude: 76.2711,
    zoom: 8,
};

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution the OpenStreetMap tile usage policy requires next to the map
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Markers and the records that could not be placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub markers: Vec<MarkerDto>,
    pub skipped: Vec<SkippedRecordDto>,
}

impl Projection {
    fn place(
        &mut self,
        kind: MarkerKind,
        record_id: i32,
        coordinates: (Option<f64>, Option<f64>),
        name: String,
        details: String,
    ) {
        let (latitude, longitude) = match coordinates {
            (Some(lat), Some(long)) => (lat, long),
            _ => {
                self.skip(kind, record_id, "missing coordinates");
                return;
            }
        };

        let usable = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !usable {
            self.skip(kind, record_id, "coordinates out of range");
            return;
        }

        self.markers.push(MarkerDto {
            kind,
            record_id,
            latitude,
            longitude,
            name,
            details,
            badge: kind.badge().to_string(),
            color: kind.color().to_string(),
        });
    }

    fn skip(&mut self, kind: MarkerKind, record_id: i32, reason: &str) {
        self.skipped.push(SkippedRecordDto {
            kind,
            record_id,
            reason: reason.to_string(),
        });
    }
}

/// Projects records onto map markers.
///
/// Resolved requests are not shown. Marker order is camps, then alerts, then resources,
/// each in input order.
pub fn project(
    camps: &[CampModel],
    requests: &[EmergencyRequestModel],
    resources: &[ResourceModel],
) -> Projection {
    let mut projection = Projection::default();

    for camp in camps {
        let occupancy = if camp.status == CampStatus::Closed {
            "closed".to_string()
        } else {
            format!("{}/{} occupied", camp.current_occupancy, camp.capacity)
        };

        projection.place(
            MarkerKind::Camp,
            camp.id,
            (camp.latitude, camp.longitude),
            camp.name.clone(),
            format!("{}, {}", camp.location, occupancy),
        );
    }

    for request in requests
        .iter()
        .filter(|r| r.status != RequestStatus::Resolved)
    {
        let details = match request.affected_people {
            Some(people) => format!("{} ({} people)", request.description, people),
            None => request.description.clone(),
        };

        projection.place(
            MarkerKind::Alert,
            request.id,
            (request.latitude, request.longitude),
            request.location.clone(),
            details,
        );
    }

    for resource in resources {
        projection.place(
            MarkerKind::Resource,
            resource.id,
            (resource.latitude, resource.longitude),
            resource.name.clone(),
            format!(
                "{} {} of {}, {}",
                resource.quantity,
                resource.unit,
                resource.resource_type.to_value(),
                resource.provider_name
            ),
        );
    }

    projection
}

pub struct MapService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MapService<'a> {
    /// Creates a new instance of [`MapService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the map overlay for a subdivision, or for everything when unscoped
    pub async fn overlay(&self, filter: MapFilter) -> Result<MapDto, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let subdivision_id = filter.subdivision_id;

        let projection = ctx
            .execute_with_retry("build map overlay", |_| {
                let db = db.clone();

                Box::pin(async move {
                    let camps = CampRepository::new(&db)
                        .select(CampFilter {
                            subdivision_id,
                            status: None,
                        })
                        .await?;
                    let requests = EmergencyRequestRepository::new(&db)
                        .select(EmergencyRequestFilter {
                            subdivision_id,
                            status: Some(RequestStatus::Pending),
                        })
                        .await?;
                    let resources = ResourceRepository::new(&db)
                        .select(ResourceFilter {
                            subdivision_id,
                            ..Default::default()
                        })
                        .await?;

                    Ok(project(&camps, &requests, &resources))
                })
            })
            .await?;

        for skipped in &projection.skipped {
            tracing::warn!(
                "Skipped {} ID {} on map: {}",
                skipped.kind.badge(),
                skipped.record_id,
                skipped.reason
            );
        }

        Ok(MapDto {
            view: DEFAULT_VIEW,
            tile_url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
            markers: projection.markers,
            skipped: projection.skipped,
        })
    }
}
