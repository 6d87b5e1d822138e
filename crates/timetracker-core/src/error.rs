//! Error handling for the timetracker crate
//!
//! The registry itself never fails: a missing tag or a disabled tracker is
//! modelled as absence. These errors cover the surrounding layers, namely
//! configuration loading and JSON export.

use thiserror::Error;

/// Error type for configuration and export operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String>, actual: Option<String> },

    /// Serialization and deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String, format: &'static str },

    /// Filesystem errors while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TrackerError::Configuration { .. } => "configuration",
            TrackerError::Serialization { .. } => "serialization",
            TrackerError::Io(_) => "io",
        }
    }

    /// Create an error for a setting whose value could not be interpreted
    pub fn invalid_setting(setting: &str, actual: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            setting: Some(setting.to_string()),
            actual: Some(actual.to_string()),
        }
    }
}

/// Result type alias for timetracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization { message: format!("JSON error: {err}"), format: "json" }
    }
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        TrackerError::Serialization { message: format!("YAML error: {err}"), format: "yaml" }
    }
}
