//! AI provider adapters.

mod mock_provider;

pub use mock_provider::{Behavior, MockEvaluationProvider, MockTranscriptionProvider};
