#![deny(warnings)]
//! Lightweight wall-clock timing for named operations.
//!
//! Callers mark the start and stop of a tagged operation on a [`TimeTracker`];
//! the tracker keeps the last duration per tag in milliseconds and reports each
//! event to a pluggable [`LogSink`].
//!
//! ```
//! use timetracker_core::TimeTracker;
//!
//! let tracker = TimeTracker::silent();
//! let rows = tracker.measure("load_rows", || vec![1, 2, 3]);
//! assert_eq!(rows.len(), 3);
//! assert!(tracker.duration("load_rows").is_some());
//! ```

use tracing::{debug, instrument};

/// Wall-clock readings
pub mod clock;
/// Tracker configuration from defaults, environment and YAML
pub mod config;
/// Shared constant strings
pub mod constants;
/// Error types for configuration and export
pub mod error;
/// The timer registry
pub mod registry;
/// Log sink capability and stock sinks
pub mod sink;
/// Testing utilities
pub mod test_utils;

pub use config::{SinkKind, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use registry::{TagDuration, TimeTracker, TimerScope};
pub use sink::{FnSink, LogSink, NullSink, TracingSink};

/// Build a tracker configured from `TIMETRACKER_*` environment variables
#[instrument]
pub fn init() -> anyhow::Result<TimeTracker> {
    let config = TrackerConfig::from_environment()?;
    debug!(enabled = config.enabled, "Initializing time tracker");
    Ok(TimeTracker::from_config(&config))
}
