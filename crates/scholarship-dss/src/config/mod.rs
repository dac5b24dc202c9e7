use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub selection: SelectionDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let period_id = env::var("APP_PERIOD_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidPeriodId)?;

        let recommendation_quota = env::var("APP_RECOMMENDATION_QUOTA")
            .unwrap_or_else(|_| DEFAULT_RECOMMENDATION_QUOTA.to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidQuota)?;
        if recommendation_quota == 0 {
            return Err(ConfigError::InvalidQuota);
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            selection: SelectionDefaults {
                period_id,
                recommendation_quota,
            },
        })
    }
}

/// Reference recommendation cutoff: the top five ranked applicants.
pub const DEFAULT_RECOMMENDATION_QUOTA: usize = 5;

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Environment-supplied defaults for a selection run; per-run settings live
/// in `workflows::selection::SelectionConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SelectionDefaults {
    pub period_id: i64,
    pub recommendation_quota: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPeriodId,
    InvalidQuota,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPeriodId => write!(f, "APP_PERIOD_ID must be a valid i64"),
            ConfigError::InvalidQuota => {
                write!(f, "APP_RECOMMENDATION_QUOTA must be a positive usize")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_PERIOD_ID");
        env::remove_var("APP_RECOMMENDATION_QUOTA");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.selection.period_id, 1);
        assert_eq!(
            config.selection.recommendation_quota,
            DEFAULT_RECOMMENDATION_QUOTA
        );
    }

    #[test]
    fn load_reads_selection_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PERIOD_ID", "7");
        env::set_var("APP_RECOMMENDATION_QUOTA", "3");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.selection.period_id, 7);
        assert_eq!(config.selection.recommendation_quota, 3);
        reset_env();
    }

    #[test]
    fn load_rejects_zero_quota() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RECOMMENDATION_QUOTA", "0");
        let error = AppConfig::load().expect_err("zero quota rejected");
        assert!(matches!(error, ConfigError::InvalidQuota));
        reset_env();
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!(
            AppEnvironment::from_str("Production"),
            AppEnvironment::Production
        );
        assert_eq!(AppEnvironment::from_str("ci"), AppEnvironment::Test);
        assert_eq!(
            AppEnvironment::from_str("anything-else"),
            AppEnvironment::Development
        );
    }
}
