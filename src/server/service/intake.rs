//! SOS intake.
//!
//! Submissions come from unauthenticated citizens over unreliable connections, so the
//! write is retried on transient store errors and made idempotent by an optional
//! client-supplied key: every attempt first looks for a request already stored under
//! that key and returns it instead of inserting a duplicate.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::emergency::{CreateEmergencyDto, EmergencyDto},
    server::{
        data::emergency::{EmergencyRequestRepository, NewEmergencyRequest},
        error::{validation::ValidationError, Error},
        service::{retry::RetryContext, validate},
    },
};

/// Maximum length of an `Idempotency-Key` header value
pub const MAX_IDEMPOTENCY_KEY_LEN: usize = 128;

/// Outcome of an SOS submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub request: EmergencyDto,
    /// `false` when the idempotency key matched an earlier submission
    pub created: bool,
}

/// Validates an SOS submission and normalizes it into a storable row.
///
/// Text fields are trimmed, blank optional fields become `None` and coordinates are
/// parsed from their decimal string form.
///
/// # Returns
/// - `Ok(NewEmergencyRequest)` - Submission is valid
/// - `Err(ValidationError)` - Names the first offending field
pub fn validate_submission(
    dto: CreateEmergencyDto,
    idempotency_key: Option<&str>,
) -> Result<NewEmergencyRequest, ValidationError> {
    let location = validate::required_text("location", &dto.location)?;
    let description = validate::required_text("description", &dto.description)?;
    let coordinates =
        validate::coordinates_from_text(dto.latitude.as_deref(), dto.longitude.as_deref())?;

    if let Some(affected_people) = dto.affected_people {
        if affected_people < 1 {
            return Err(ValidationError::new(
                "affected_people",
                "affected_people must be at least 1",
            ));
        }
    }

    let idempotency_key = match idempotency_key {
        Some(key) if key.is_empty() || key.chars().count() > MAX_IDEMPOTENCY_KEY_LEN => {
            return Err(ValidationError::new(
                "Idempotency-Key",
                format!("Idempotency-Key must be 1 to {MAX_IDEMPOTENCY_KEY_LEN} characters"),
            ));
        }
        key => key.map(str::to_string),
    };

    Ok(NewEmergencyRequest {
        location,
        description,
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, long)| long),
        contact_name: validate::optional_text(dto.contact_name),
        contact_phone: validate::optional_text(dto.contact_phone),
        affected_people: dto.affected_people,
        water_depth: dto.water_depth.map(Into::into),
        medical_needs: validate::optional_text(dto.medical_needs),
        subdivision_id: dto.subdivision_id,
        idempotency_key,
    })
}

pub struct IntakeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IntakeService<'a> {
    /// Creates a new instance of [`IntakeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new SOS request with status `pending`.
    ///
    /// # Arguments
    /// - `dto` - Submitted form fields
    /// - `idempotency_key` - Optional client key; repeated submissions with the same key
    ///   return the originally stored request
    ///
    /// # Returns
    /// - `Ok(Submission)` - Stored (or previously stored) request
    /// - `Err(Error::ValidationError)` - Submission rejected
    /// - `Err(Error::DbErr)` - Store failed after retries
    pub async fn submit(
        &self,
        dto: CreateEmergencyDto,
        idempotency_key: Option<&str>,
    ) -> Result<Submission, Error> {
        let request = validate_submission(dto, idempotency_key)?;

        let mut ctx: RetryContext<()> = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("submit emergency request", |_| {
            let db = db.clone();
            let request = request.clone();

            Box::pin(async move {
                let repo = EmergencyRequestRepository::new(&db);

                if let Some(key) = request.idempotency_key.as_deref() {
                    if let Some(existing) = repo.find_by_idempotency_key(key).await? {
                        tracing::info!(
                            "Idempotency key matched emergency request ID {}",
                            existing.id
                        );
                        return Ok(Submission {
                            request: existing.into(),
                            created: false,
                        });
                    }
                }

                match repo.insert(request.clone()).await {
                    Ok(stored) => {
                        tracing::info!(
                            "Stored emergency request ID {} at {}",
                            stored.id,
                            stored.location
                        );
                        Ok(Submission {
                            request: stored.into(),
                            created: true,
                        })
                    }
                    Err(err) => {
                        // A concurrent submission with the same key may have won the unique index
                        if let Some(key) = request.idempotency_key.as_deref() {
                            if let Some(existing) = repo.find_by_idempotency_key(key).await? {
                                return Ok(Submission {
                                    request: existing.into(),
                                    created: false,
                                });
                            }
                        }

                        Err(err.into())
                    }
                }
            })
        })
        .await
    }
}
