//! Assessment content and session module.
//!
//! Questions, rubric criteria, learner responses, the session aggregate
//! and the retention lifecycle events it emits.

mod blueprint;
mod criterion;
mod events;
mod question;
mod response;
mod session;

pub use blueprint::AssessmentBlueprint;
pub use criterion::{AssessmentCriterion, PerformanceLevel, RubricDescriptor};
pub use events::{
    AiDegraded, AssessmentCompleted, AssessmentStarted, ResponseRecorded, RetentionEvent,
    ASSESSMENT_COMPLETED, ASSESSMENT_IA_DEGRADED, ASSESSMENT_RESPONSE_RECORDED,
    ASSESSMENT_STARTED,
};
pub use question::{AnswerOption, AssessmentQuestion, QuestionCore, QuestionSet};
pub use response::{score_option_overlap, AssessmentResponse, CriterionScore};
pub use session::AssessmentSession;
