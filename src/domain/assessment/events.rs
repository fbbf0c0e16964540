//! Retention events emitted by the assessment use cases.
//!
//! Events are fire-and-forget analytics signals: emission failures are
//! logged by the emitter and never fail the use case.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::{BlueprintId, CefrLevel, QuestionId, SessionId, UserId};

pub const ASSESSMENT_STARTED: &str = "assessment.started";
pub const ASSESSMENT_RESPONSE_RECORDED: &str = "assessment.response_recorded";
pub const ASSESSMENT_COMPLETED: &str = "assessment.completed";
pub const ASSESSMENT_IA_DEGRADED: &str = "assessment.ia_degraded";

/// A domain event destined for the retention pipeline.
pub trait RetentionEvent {
    fn name(&self) -> &'static str;
    fn payload(&self) -> Value;
}

/// A learner opened a new assessment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentStarted {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub blueprint_id: BlueprintId,
    pub question_count: usize,
}

impl RetentionEvent for AssessmentStarted {
    fn name(&self) -> &'static str {
        ASSESSMENT_STARTED
    }

    fn payload(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "user_id": self.user_id,
            "blueprint_id": self.blueprint_id,
            "question_count": self.question_count,
        })
    }
}

/// A response was accepted into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecorded {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub answered: usize,
    pub total: usize,
}

impl RetentionEvent for ResponseRecorded {
    fn name(&self) -> &'static str {
        ASSESSMENT_RESPONSE_RECORDED
    }

    fn payload(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "question_id": self.question_id,
            "answered": self.answered,
            "total": self.total,
        })
    }
}

/// A session was finalized with a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentCompleted {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub level: CefrLevel,
    pub score: f64,
}

impl RetentionEvent for AssessmentCompleted {
    fn name(&self) -> &'static str {
        ASSESSMENT_COMPLETED
    }

    fn payload(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "user_id": self.user_id,
            "level": self.level,
            "score": self.score,
        })
    }
}

/// An AI provider call failed during the speaking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDegraded {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    /// Pipeline stage that failed, e.g. "transcription" or "evaluation".
    pub stage: String,
    /// Provider error kind as its wire code, e.g. "TIMEOUT".
    pub error_kind: String,
}

impl RetentionEvent for AiDegraded {
    fn name(&self) -> &'static str {
        ASSESSMENT_IA_DEGRADED
    }

    fn payload(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "question_id": self.question_id,
            "stage": self.stage,
            "error_kind": self.error_kind,
        })
    }
}
