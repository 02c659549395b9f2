use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient store errors)
    Retry,
    /// Failed permanently (bad input, missing rows, bugs)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection acquisition and connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, constraint violations, type conversion and missing-row
                // errors will not resolve by running the same statement again
                _ => ErrorRetryStrategy::Fail,
            },

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::ValidationError(_) => ErrorRetryStrategy::Fail,
            Self::ReliefError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::ErrorRetryStrategy;
    use crate::server::error::{relief::ReliefError, validation::ValidationError, Error};

    /// Expect connection errors to be retried
    #[test]
    fn retries_connection_errors() {
        let err = Error::DbErr(DbErr::Conn(RuntimeErr::Internal(
            "connection reset".to_string(),
        )));

        assert_eq!(err.to_retry_strategy(), ErrorRetryStrategy::Retry);
    }

    /// Expect query errors and domain errors to fail immediately
    #[test]
    fn fails_permanent_errors() {
        let query = Error::DbErr(DbErr::Custom("unique violation".to_string()));
        let validation = Error::ValidationError(ValidationError::new("location", "required"));
        let missing = Error::ReliefError(ReliefError::NotFound {
            record: "Camp",
            id: 1,
        });

        assert_eq!(query.to_retry_strategy(), ErrorRetryStrategy::Fail);
        assert_eq!(validation.to_retry_strategy(), ErrorRetryStrategy::Fail);
        assert_eq!(missing.to_retry_strategy(), ErrorRetryStrategy::Fail);
    }
}
