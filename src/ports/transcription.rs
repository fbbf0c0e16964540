//! Speech-to-text provider port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::provider_error::ProviderError;

/// A request to transcribe one recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    /// Opaque reference to the stored audio (storage key or URL).
    pub audio_ref: String,
    /// BCP 47 hint for the expected language, e.g. "en-US".
    pub locale_hint: Option<String>,
    /// The question prompt, given to the model as context.
    pub prompt: Option<String>,
}

/// A completed transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub transcript: String,
    pub duration_ms: Option<u64>,
}

/// Transcribes recorded speaking answers.
///
/// Implementations must return promptly with `Cancelled` when the token
/// fires; the call executor enforces the deadline around them.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
        cancellation: CancellationToken,
    ) -> Result<Transcription, ProviderError>;
}
