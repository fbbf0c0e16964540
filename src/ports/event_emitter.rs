//! Retention event emission port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::assessment::RetentionEvent;

/// Fire-and-forget sink for retention events.
///
/// Emission is infallible from the caller's point of view: adapters log
/// delivery failures themselves and never surface them.
#[async_trait]
pub trait RetentionEventEmitter: Send + Sync {
    async fn emit(&self, name: &'static str, payload: Value);

    /// Emits any typed retention event.
    async fn emit_event(&self, event: &(dyn RetentionEvent + Sync)) {
        self.emit(event.name(), event.payload()).await;
    }
}
