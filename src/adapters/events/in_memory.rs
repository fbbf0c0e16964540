//! In-memory retention event sink.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use tracing::debug;

use crate::ports::RetentionEventEmitter;

/// Records emitted events in memory, for tests and local development.
#[derive(Default)]
pub struct InMemoryRetentionEmitter {
    events: Mutex<Vec<(String, Value)>>,
}

impl InMemoryRetentionEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order.
    pub fn recorded(&self) -> Vec<(String, Value)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of events emitted under the given name.
    pub fn count_of(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|(n, _)| n == name)
            .count()
    }
}

#[async_trait]
impl RetentionEventEmitter for InMemoryRetentionEmitter {
    async fn emit(&self, name: &'static str, payload: Value) {
        debug!(event = name, "retention event emitted");
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((name.to_string(), payload));
    }
}
