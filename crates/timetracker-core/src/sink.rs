//! Log sinks for timer events
//!
//! Every event the registry emits is a `(tag, message)` pair where `tag` is
//! always [`LOG_TAG`](crate::constants::logging::LOG_TAG). A sink is picked when
//! the tracker is built and is called synchronously, so implementations should
//! not block.

use crate::constants::logging::TRACING_TARGET;
use std::fmt;
use tracing::debug;

/// Consumer of registry log events
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Called once per event with the fixed log tag and a formatted message
    fn log(&self, tag: &str, message: &str);
}

/// Default sink: forwards events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, tag: &str, message: &str) {
        debug!(target: TRACING_TARGET, tag = tag, "{message}");
    }
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _tag: &str, _message: &str) {}
}

/// Sink backed by an arbitrary callback
pub struct FnSink<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    callback: F,
}

impl<F> FnSink<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    /// Wrap `callback` as a sink
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> LogSink for FnSink<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn log(&self, tag: &str, message: &str) {
        (self.callback)(tag, message);
    }
}

impl<F> fmt::Debug for FnSink<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}
