use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum WaterDepth {
    #[sea_orm(string_value = "ankle")]
    Ankle,
    #[sea_orm(string_value = "knee")]
    Knee,
    #[sea_orm(string_value = "waist")]
    Waist,
    #[sea_orm(string_value = "chest")]
    Chest,
    #[sea_orm(string_value = "above_head")]
    AboveHead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "pending_acceptance")]
    PendingAcceptance,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CampStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "full")]
    Full,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ResourceType {
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "transport")]
    Transport,
    #[sea_orm(string_value = "medical")]
    Medical,
    #[sea_orm(string_value = "shelter")]
    Shelter,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ResourceStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ProviderType {
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "industry")]
    Industry,
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "individual")]
    Individual,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum FeedType {
    #[sea_orm(string_value = "rtsp")]
    Rtsp,
    #[sea_orm(string_value = "webcam")]
    Webcam,
    #[sea_orm(string_value = "phone")]
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RescueCameraStatus {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "offline")]
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum WaterLevelCameraStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "error")]
    Error,
}
