use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::payments::PaymentPolicy;

/// Distinguishes runtime behavior for different stages of deployment.
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

/// Top-level configuration for the rule engine and its command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub policy: PaymentPolicy,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = PaymentPolicy::default();
        let max_amount = read_var("PAYMENT_MAX_AMOUNT", defaults.max_amount)?;
        if !max_amount.is_finite() || max_amount <= 0.0 {
            return Err(ConfigError::OutOfRange {
                variable: "PAYMENT_MAX_AMOUNT",
                value: max_amount.to_string(),
            });
        }

        let policy = PaymentPolicy {
            max_amount,
            edit_window_days: read_window("PAYMENT_EDIT_WINDOW_DAYS", defaults.edit_window_days)?,
            delete_window_days: read_window(
                "PAYMENT_DELETE_WINDOW_DAYS",
                defaults.delete_window_days,
            )?,
            max_payment_age_months: read_var(
                "PAYMENT_MAX_AGE_MONTHS",
                defaults.max_payment_age_months,
            )?,
            ..defaults
        };

        Ok(Self {
            environment,
            policy,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{variable} must be a number, got '{value}'")]
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    #[error("{variable} is out of range: {value}")]
    OutOfRange {
        variable: &'static str,
        value: String,
    },
}

fn read_var<T: FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable, value }),
        Err(_) => Ok(default),
    }
}

fn read_window(variable: &'static str, default: i64) -> Result<i64, ConfigError> {
    let days = read_var(variable, default)?;
    if days < 0 || chrono::Duration::try_days(days).is_none() {
        return Err(ConfigError::OutOfRange {
            variable,
            value: days.to_string(),
        });
    }
    Ok(days)
}
