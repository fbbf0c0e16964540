//! Use-case command handlers.

mod finalize_assessment;
mod speaking_pipeline;
mod start_assessment;
mod submit_response;

pub use finalize_assessment::{
    FinalizeAssessmentCommand, FinalizeAssessmentHandler, FinalizeAssessmentResult,
};
pub use speaking_pipeline::{
    SpeakingPipelineCommand, SpeakingPipelineHandler, SpeakingPipelineResult,
};
pub use start_assessment::{
    StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult,
};
pub use submit_response::{
    SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult,
};
