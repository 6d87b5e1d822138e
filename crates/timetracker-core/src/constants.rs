/// Fixed strings shared across the timetracker crate
///
/// Log tags and environment variable names live here so the registry, the
/// configuration loader and the tests agree on a single spelling.
/// Log sink constants
pub mod logging {
    /// Tag passed as the first argument of every registry log event
    pub const LOG_TAG: &str = "TIMETRACKER";

    /// `tracing` target used by the default sink
    pub const TRACING_TARGET: &str = "timetracker";
}

/// Environment variables read by `TrackerConfig::from_environment`
pub mod env {
    /// Enables or disables tracking (`true`/`false`, `1`/`0`, `on`/`off`)
    pub const ENABLED: &str = "TIMETRACKER_ENABLED";

    /// Selects the log sink (`tracing` or `none`)
    pub const LOG_SINK: &str = "TIMETRACKER_LOG";
}
