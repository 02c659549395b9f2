//! Field checks shared by the services' input validation.

use sea_orm::ConnectionTrait;

use crate::server::{
    data::{subdivision::SubdivisionRepository, team::TeamRepository},
    error::{validation::ValidationError, Error},
};

/// Trims a required text field, rejecting blank input.
pub fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional text field, treating blank input as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional latitude/longitude pair given as decimal strings.
///
/// Blank strings count as absent. Either both or neither coordinate must be given.
pub fn coordinates_from_text(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<Option<(f64, f64)>, ValidationError> {
    let latitude = latitude
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_degrees("latitude", v))
        .transpose()?;
    let longitude = longitude
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_degrees("longitude", v))
        .transpose()?;

    coordinates(latitude, longitude)
}

/// Checks an optional numeric latitude/longitude pair.
pub fn coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<(f64, f64)>, ValidationError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(ValidationError::new(
            "longitude",
            "longitude is required when latitude is given",
        )),
        (None, Some(_)) => Err(ValidationError::new(
            "latitude",
            "latitude is required when longitude is given",
        )),
        (Some(lat), Some(long)) => {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(ValidationError::new(
                    "latitude",
                    "latitude must be between -90 and 90",
                ));
            }
            if !long.is_finite() || !(-180.0..=180.0).contains(&long) {
                return Err(ValidationError::new(
                    "longitude",
                    "longitude must be between -180 and 180",
                ));
            }

            Ok(Some((lat, long)))
        }
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .map_err(|_| ValidationError::new(field, format!("{field} must be a decimal number")))
}

/// Rejects negative counts.
pub fn non_negative(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(
            field,
            format!("{field} cannot be negative"),
        ));
    }

    Ok(value)
}

/// Rejects references to subdivisions or teams that do not exist.
pub async fn owner_exists<C: ConnectionTrait>(
    db: &C,
    subdivision_id: Option<i32>,
    team_lead_id: Option<i32>,
) -> Result<(), Error> {
    if let Some(subdivision_id) = subdivision_id {
        if SubdivisionRepository::new(db)
            .get(subdivision_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::new(
                "subdivision_id",
                format!("subdivision ID {subdivision_id} does not exist"),
            )
            .into());
        }
    }

    if let Some(team_lead_id) = team_lead_id {
        if TeamRepository::new(db).get(team_lead_id).await?.is_none() {
            return Err(ValidationError::new(
                "team_lead_id",
                format!("team ID {team_lead_id} does not exist"),
            )
            .into());
        }
    }

    Ok(())
}
