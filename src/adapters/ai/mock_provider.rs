//! Scriptable AI providers, for tests and local development.
//!
//! Each provider is configured with a behavior: answer after an optional
//! latency, fail with a given error, or hang until cancelled. All of them
//! observe the cancellation token, as the real adapters must.

use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::ports::{
    EvaluationContext, ProviderError, RubricEvaluation, RubricEvaluationProvider, Transcription,
    TranscriptionProvider, TranscriptionRequest,
};

/// What a scripted provider call does.
pub enum Behavior<T> {
    /// Respond with this value, after `latency`.
    Respond(T),
    /// Fail with this error, after `latency`.
    Fail(ProviderError),
    /// Never answer; resolve only through cancellation.
    Hang,
}

async fn wait_or_cancel(
    latency: Duration,
    cancellation: &CancellationToken,
    method: &str,
) -> Result<(), ProviderError> {
    tokio::select! {
        _ = tokio::time::sleep(latency) => Ok(()),
        _ = cancellation.cancelled() => Err(ProviderError::cancelled(method)),
    }
}

pub struct MockTranscriptionProvider {
    behavior: Behavior<Transcription>,
    latency: Duration,
}

impl MockTranscriptionProvider {
    pub fn respond(transcript: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Respond(Transcription {
                transcript: transcript.into(),
                duration_ms: Some(4_200),
            }),
            latency: Duration::ZERO,
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            behavior: Behavior::Fail(error),
            latency: Duration::ZERO,
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscriptionProvider {
    async fn transcribe(
        &self,
        _request: TranscriptionRequest,
        cancellation: CancellationToken,
    ) -> Result<Transcription, ProviderError> {
        match &self.behavior {
            Behavior::Respond(transcription) => {
                wait_or_cancel(self.latency, &cancellation, "transcribe").await?;
                Ok(transcription.clone())
            }
            Behavior::Fail(error) => {
                wait_or_cancel(self.latency, &cancellation, "transcribe").await?;
                Err(error.clone())
            }
            Behavior::Hang => {
                cancellation.cancelled().await;
                Err(ProviderError::cancelled("transcribe"))
            }
        }
    }
}

pub struct MockEvaluationProvider {
    behavior: Behavior<RubricEvaluation>,
    latency: Duration,
}

impl MockEvaluationProvider {
    pub fn respond(evaluation: RubricEvaluation) -> Self {
        Self {
            behavior: Behavior::Respond(evaluation),
            latency: Duration::ZERO,
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            behavior: Behavior::Fail(error),
            latency: Duration::ZERO,
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl RubricEvaluationProvider for MockEvaluationProvider {
    async fn evaluate(
        &self,
        _transcript: String,
        _context: EvaluationContext,
        cancellation: CancellationToken,
    ) -> Result<RubricEvaluation, ProviderError> {
        match &self.behavior {
            Behavior::Respond(evaluation) => {
                wait_or_cancel(self.latency, &cancellation, "evaluate").await?;
                Ok(evaluation.clone())
            }
            Behavior::Fail(error) => {
                wait_or_cancel(self.latency, &cancellation, "evaluate").await?;
                Err(error.clone())
            }
            Behavior::Hang => {
                cancellation.cancelled().await;
                Err(ProviderError::cancelled("evaluate"))
            }
        }
    }
}
