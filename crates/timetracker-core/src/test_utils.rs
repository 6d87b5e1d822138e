//! Testing utilities

use crate::sink::LogSink;
use std::sync::Mutex;

/// Sink that keeps every event in memory for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(tag, message)` pairs, oldest first.
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Only the messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|(_, message)| message).collect()
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<String> {
        self.messages().pop()
    }

    /// Forget every recorded event.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl LogSink for RecordingSink {
    fn log(&self, tag: &str, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((tag.to_string(), message.to_string()));
        }
    }
}
