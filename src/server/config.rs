use std::str::FromStr;

use crate::server::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    /// Seconds between dashboard re-fetches advertised to clients
    pub dashboard_refresh_secs: u64,
    /// Seconds a deleted camera stays restorable before the purge job removes it
    pub camera_undo_window_secs: i64,
}

impl Config {
    pub const DEFAULT_DASHBOARD_REFRESH_SECS: u64 = 30;
    pub const DEFAULT_CAMERA_UNDO_WINDOW_SECS: i64 = 30;
    /// Upper bound for any interval setting: one year
    pub const MAX_INTERVAL_SECS: u32 = 365 * 24 * 60 * 60;

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            dashboard_refresh_secs: optional(
                "DASHBOARD_REFRESH_SECS",
                Self::DEFAULT_DASHBOARD_REFRESH_SECS,
                Self::MAX_INTERVAL_SECS.into(),
            )?,
            camera_undo_window_secs: optional(
                "CAMERA_UNDO_WINDOW_SECS",
                Self::DEFAULT_CAMERA_UNDO_WINDOW_SECS,
                Self::MAX_INTERVAL_SECS.into(),
            )?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional<T>(var: &str, default: T, max: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = std::env::var(var) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    if value > max {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("must be at most {max}"),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so each test uses its own names
    // through `optional` rather than `Config::from_env`.

    #[test]
    fn uses_default_when_unset() {
        let value = optional("FLOODWATCH_TEST_UNSET_SECS", 30_u64, 3600);

        assert!(matches!(value, Ok(30)));
    }

    #[test]
    fn parses_positive_value() {
        std::env::set_var("FLOODWATCH_TEST_REFRESH_SECS", "45");

        let value = optional("FLOODWATCH_TEST_REFRESH_SECS", 30_u64, 3600);

        assert!(matches!(value, Ok(45)));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        std::env::set_var("FLOODWATCH_TEST_ZERO_SECS", "0");
        std::env::set_var("FLOODWATCH_TEST_GARBAGE_SECS", "soon");

        let zero = optional("FLOODWATCH_TEST_ZERO_SECS", 30_i64, 3600);
        let garbage = optional("FLOODWATCH_TEST_GARBAGE_SECS", 30_i64, 3600);

        assert!(matches!(zero, Err(ConfigError::InvalidEnvValue { .. })));
        assert!(matches!(garbage, Err(ConfigError::InvalidEnvValue { .. })));
    }

    #[test]
    fn rejects_values_above_one_year() {
        std::env::set_var("FLOODWATCH_TEST_HUGE_SECS", "1000000000000000");
        std::env::set_var("FLOODWATCH_TEST_YEAR_SECS", "31536000");

        let max = i64::from(Config::MAX_INTERVAL_SECS);
        let huge = optional("FLOODWATCH_TEST_HUGE_SECS", 30_i64, max);
        let year = optional("FLOODWATCH_TEST_YEAR_SECS", 30_i64, max);

        assert!(matches!(huge, Err(ConfigError::InvalidEnvValue { .. })));
        assert!(matches!(year, Ok(31_536_000)));
    }
}
