//! AI provider call configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigError;

/// Deadlines and defaults for the speaking pipeline's provider calls.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Deadline for one transcription call, in milliseconds.
    #[serde(default = "default_transcription_timeout_ms")]
    pub transcription_timeout_ms: u64,
    /// Deadline for one rubric evaluation call, in milliseconds.
    #[serde(default = "default_evaluation_timeout_ms")]
    pub evaluation_timeout_ms: u64,
    /// BCP 47 locale hint passed to transcription when the request has none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_transcription_timeout_ms() -> u64 {
    30_000
}

fn default_evaluation_timeout_ms() -> u64 {
    45_000
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            transcription_timeout_ms: default_transcription_timeout_ms(),
            evaluation_timeout_ms: default_evaluation_timeout_ms(),
            default_locale: default_locale(),
        }
    }
}

impl AiConfig {
    pub fn transcription_deadline(&self) -> Duration {
        Duration::from_millis(self.transcription_timeout_ms)
    }

    pub fn evaluation_deadline(&self) -> Duration {
        Duration::from_millis(self.evaluation_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transcription_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "ai.transcription_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.evaluation_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "ai.evaluation_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::invalid("ai.default_locale", "must not be empty"));
        }
        Ok(())
    }
}
