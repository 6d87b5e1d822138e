//! Tracker configuration
//!
//! A [`TrackerConfig`] decides the initial value of the enable flag and which
//! log sink a [`TimeTracker`](crate::TimeTracker) is built with. It can come
//! from defaults, from `TIMETRACKER_*` environment variables or from YAML.

use crate::constants::env;
use crate::error::{TrackerError, TrackerResult};
use crate::sink::{LogSink, NullSink, TracingSink};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Log sink selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Forward events to `tracing`
    #[default]
    Tracing,
    /// Drop all events
    None,
}

impl SinkKind {
    /// Build the sink this kind stands for
    pub fn build(self) -> Arc<dyn LogSink> {
        match self {
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::None => Arc::new(NullSink),
        }
    }
}

impl FromStr for SinkKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tracing" | "debug" => Ok(SinkKind::Tracing),
            "none" | "off" | "silent" => Ok(SinkKind::None),
            _ => Err(TrackerError::invalid_setting(
                env::LOG_SINK,
                s,
                "unknown log sink, expected `tracing` or `none`",
            )),
        }
    }
}

/// Configuration for a [`TimeTracker`](crate::TimeTracker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Initial value of the enable flag
    pub enabled: bool,
    /// Where log events go
    pub log_sink: SinkKind,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { enabled: true, log_sink: SinkKind::Tracing }
    }
}

impl TrackerConfig {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_environment() -> TrackerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    ///
    /// Missing keys keep their default; present but unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> TrackerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(env::ENABLED) {
            config.enabled = parse_flag(env::ENABLED, &raw)?;
        }
        if let Some(raw) = lookup(env::LOG_SINK) {
            config.log_sink = raw.parse()?;
        }

        debug!(
            enabled = config.enabled,
            log_sink = ?config.log_sink,
            "Loaded tracker configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> TrackerResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }
}

fn parse_flag(setting: &str, raw: &str) -> TrackerResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TrackerError::invalid_setting(setting, raw, "expected a boolean flag")),
    }
}
