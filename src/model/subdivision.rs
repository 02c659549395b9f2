use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SubdivisionDto {
    pub id: i32,
    pub name: String,
    pub district_id: i32,
    pub district_name: String,
}
