use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    /// The error message
    pub error: String,
    /// The request field that failed validation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
