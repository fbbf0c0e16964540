//! Ports - trait boundaries between the application core and the outside
//! world, plus the shared provider error taxonomy.

mod blueprint_provider;
mod event_emitter;
mod provider_error;
mod rubric_evaluation;
mod session_repository;
mod transcription;
mod user_repository;

pub use blueprint_provider::BlueprintProvider;
pub use event_emitter::RetentionEventEmitter;
pub use provider_error::{ProviderError, ProviderErrorKind};
pub use rubric_evaluation::{
    CriterionEvaluation, EvaluationContext, RubricBand, RubricDescription,
    RubricEvaluation, RubricEvaluationProvider,
};
pub use session_repository::SessionRepository;
pub use transcription::{Transcription, TranscriptionProvider, TranscriptionRequest};
pub use user_repository::{LearnerProfile, UserRepository};
