//! Per-tag wall-clock timer registry
//!
//! [`TimeTracker`] records the start time of a tag on [`start`](TimeTracker::start)
//! and turns it into a millisecond duration on [`stop`](TimeTracker::stop). Only
//! the last duration per tag is kept. Every state change is reported to the
//! tracker's [`LogSink`] with the fixed tag `"TIMETRACKER"`.
//!
//! A few behaviours are easy to trip over and are kept on purpose:
//!
//! * calling `start` twice before `stop` silently restarts the interval;
//! * `stop` leaves the start time in place, so a second `stop` without a new
//!   `start` measures again from the old start time;
//! * `stop` for a tag that was never started only logs
//!   `"No timer initiated for this tag"`;
//! * if the block given to [`measure`](TimeTracker::measure) panics, `stop` is
//!   never called and the start time stays behind.
//!
//! One mutex guards both maps and the enable flag. Concurrent callers working
//! on the same tag still see lost updates; there is no ordering guarantee
//! between them.

use crate::clock;
use crate::config::TrackerConfig;
use crate::constants::logging::LOG_TAG;
use crate::error::TrackerResult;
use crate::sink::{LogSink, NullSink, TracingSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const NO_TIMER_MESSAGE: &str = "No timer initiated for this tag";
const CLEARED_MESSAGE: &str = "All times are cleared";

/// Last recorded duration of one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDuration {
    /// Caller-chosen tag
    pub tag: String,
    /// Elapsed wall-clock milliseconds between start and stop
    pub duration_ms: i64,
}

#[derive(Debug)]
struct TrackerState {
    enabled: bool,
    start_times: HashMap<String, i64>,
    durations: HashMap<String, i64>,
    /// Tags in the order their first duration was recorded
    recorded_order: Vec<String>,
}

impl TrackerState {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            start_times: HashMap::new(),
            durations: HashMap::new(),
            recorded_order: Vec::new(),
        }
    }

    fn record(&mut self, tag: &str, duration: i64) {
        if self.durations.insert(tag.to_string(), duration).is_none() {
            self.recorded_order.push(tag.to_string());
        }
    }

    fn ordered_durations(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.recorded_order
            .iter()
            .filter_map(|tag| self.durations.get(tag).map(|duration| (tag.as_str(), *duration)))
    }

    fn clear(&mut self) {
        self.start_times.clear();
        self.durations.clear();
        self.recorded_order.clear();
    }
}

/// Registry of named wall-clock timers
///
/// Build one per application and share it by reference or through an `Arc`.
#[derive(Debug)]
pub struct TimeTracker {
    state: Mutex<TrackerState>,
    sink: Arc<dyn LogSink>,
}

impl TimeTracker {
    /// Create an enabled tracker that logs through `tracing`
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create an enabled tracker with a custom log sink
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self { state: Mutex::new(TrackerState::new(true)), sink }
    }

    /// Create an enabled tracker that logs nothing
    pub fn silent() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// Create a tracker from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self { state: Mutex::new(TrackerState::new(config.enabled)), sink: config.log_sink.build() }
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, message: &str) {
        self.sink.log(LOG_TAG, message);
    }

    /// Whether tracking is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    /// Enable or disable tracking
    ///
    /// Disabling hides recorded durations without deleting them.
    pub fn set_enabled(&self, enabled: bool) {
        self.state().enabled = enabled;
    }

    /// Start (or restart) the timer for `tag`
    pub fn start(&self, tag: &str) {
        {
            let mut state = self.state();
            if !state.enabled {
                return;
            }
            state.start_times.insert(tag.to_string(), clock::now_millis());
        }
        self.emit(&format!("Started time for {tag}"));
    }

    /// Stop the timer for `tag` and record its duration
    pub fn stop(&self, tag: &str) {
        let message = {
            let mut state = self.state();
            if !state.enabled {
                return;
            }
            match state.start_times.get(tag).copied() {
                Some(start_time) => {
                    let duration = clock::now_millis() - start_time;
                    state.record(tag, duration);
                    format!("Stopped timer for {tag}, duration :{duration} ms")
                }
                None => NO_TIMER_MESSAGE.to_string(),
            }
        };
        self.emit(&message);
    }

    /// Last recorded duration for `tag` in milliseconds
    ///
    /// Returns `None` while tracking is disabled or if `tag` was never stopped.
    pub fn duration(&self, tag: &str) -> Option<i64> {
        let state = self.state();
        if !state.enabled {
            return None;
        }
        state.durations.get(tag).copied()
    }

    /// Snapshot of all recorded durations, in the order tags were first recorded
    pub fn durations(&self) -> Vec<TagDuration> {
        let state = self.state();
        if !state.enabled {
            return Vec::new();
        }
        state
            .ordered_durations()
            .map(|(tag, duration_ms)| TagDuration { tag: tag.to_string(), duration_ms })
            .collect()
    }

    /// Log one line per recorded duration
    pub fn print_all_durations(&self) {
        for entry in self.durations() {
            self.emit(&format!("{} took {} to complete", entry.tag, entry.duration_ms));
        }
    }

    /// Clear all start times and durations, whether enabled or not
    pub fn reset(&self) {
        self.state().clear();
        self.emit(CLEARED_MESSAGE);
    }

    /// Time `block` under `tag` and return its result
    ///
    /// If `block` panics the panic propagates untouched and the timer is left
    /// running; use [`scope`](Self::scope) when the stop must always happen.
    pub fn measure<T, F>(&self, tag: &str, block: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.start(tag);
        let result = block();
        self.stop(tag);
        result
    }

    /// Start `tag` and stop it when the returned guard is dropped
    pub fn scope(&self, tag: impl Into<String>) -> TimerScope<'_> {
        TimerScope::new(self, tag.into())
    }

    /// Export recorded durations as pretty-printed JSON
    pub fn export_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(&self.durations())?)
    }
}

impl Default for TimeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped timer that stops its tag when dropped, including during unwinding
#[must_use = "the timer stops as soon as the scope guard is dropped"]
pub struct TimerScope<'a> {
    tracker: &'a TimeTracker,
    tag: String,
}

impl<'a> TimerScope<'a> {
    /// Start `tag` on `tracker` and hold it until the guard drops
    pub fn new(tracker: &'a TimeTracker, tag: String) -> Self {
        tracker.start(&tag);
        Self { tracker, tag }
    }

    /// Tag this guard stops on drop
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<'a> Drop for TimerScope<'a> {
    fn drop(&mut self) {
        self.tracker.stop(&self.tag);
    }
}

/// Convenience macro for timing a block
#[macro_export]
macro_rules! measure {
    ($tracker:expr, $tag:expr, $code:block) => {
        $tracker.measure($tag, || $code)
    };
}

/// Time the rest of the enclosing scope
#[macro_export]
macro_rules! track_scope {
    ($tracker:expr, $tag:expr) => {
        let _timer_scope = $crate::registry::TimerScope::new($tracker, $tag.to_string());
    };
}
