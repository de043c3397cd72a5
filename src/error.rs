use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Operational failures of the command line. Rule violations are never
/// errors; they come back as reports.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
}
