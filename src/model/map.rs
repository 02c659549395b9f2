use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Camp,
    Alert,
    Resource,
}

impl MarkerKind {
    /// Popup badge text
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Camp => "CAMP",
            Self::Alert => "ALERT",
            Self::Resource => "RESOURCE",
        }
    }

    /// Marker pin colour
    pub fn color(&self) -> &'static str {
        match self {
            Self::Camp => "blue",
            Self::Alert => "red",
            Self::Resource => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MarkerDto {
    pub kind: MarkerKind,
    /// Id of the record the marker was projected from
    pub record_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub details: String,
    pub badge: String,
    pub color: String,
}

/// A record left off the map because its coordinates were missing or unusable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SkippedRecordDto {
    pub kind: MarkerKind,
    pub record_id: i32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MapViewDto {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MapDto {
    pub view: MapViewDto,
    pub tile_url: String,
    pub attribution: String,
    pub markers: Vec<MarkerDto>,
    pub skipped: Vec<SkippedRecordDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct MapFilter {
    pub subdivision_id: Option<i32>,
}
