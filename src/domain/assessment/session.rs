//! Assessment session aggregate.
//!
//! The session is the unit of work for one learner taking one assessment
//! blueprint. Responses are append-only, at most one per question; the
//! lifecycle is monotonic and closed sessions never accept mutations.
//!
//! # Ownership
//!
//! The use-case layer owns session mutation; value objects own their own
//! validation; a repository port owns durability.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::AssessmentDiagnostic;
use crate::domain::foundation::{
    BlueprintId, CefrLevel, DomainError, ErrorCode, QuestionId, SessionId, SessionStatus,
    Timestamp, UserId,
};

use super::question::QuestionSet;
use super::response::AssessmentResponse;

/// One learner's run through an assessment blueprint.
///
/// # Invariants
///
/// - at most one response per question id, each for a question in the set
/// - `completed_at >= started_at` when present
/// - status transitions are monotonic; no resurrecting closed sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    id: SessionId,
    user_id: UserId,
    blueprint_id: BlueprintId,
    status: SessionStatus,
    target_level: Option<CefrLevel>,
    questions: QuestionSet,
    responses: Vec<AssessmentResponse>,
    diagnostic: Option<AssessmentDiagnostic>,
    started_at: Timestamp,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl AssessmentSession {
    /// Creates a fresh in-progress session for a learner.
    pub fn start(
        id: SessionId,
        user_id: UserId,
        blueprint_id: BlueprintId,
        questions: QuestionSet,
        target_level: Option<CefrLevel>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            blueprint_id,
            status: SessionStatus::InProgress,
            target_level,
            questions,
            responses: Vec::new(),
            diagnostic: None,
            started_at: now,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Reconstitute a session from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        blueprint_id: BlueprintId,
        status: SessionStatus,
        target_level: Option<CefrLevel>,
        questions: QuestionSet,
        responses: Vec<AssessmentResponse>,
        diagnostic: Option<AssessmentDiagnostic>,
        started_at: Timestamp,
        created_at: Timestamp,
        updated_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            user_id,
            blueprint_id,
            status,
            target_level,
            questions,
            responses,
            diagnostic,
            started_at,
            created_at,
            updated_at,
            completed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn blueprint_id(&self) -> &BlueprintId {
        &self.blueprint_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn target_level(&self) -> Option<CefrLevel> {
        self.target_level
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn responses(&self) -> &[AssessmentResponse] {
        &self.responses
    }

    pub fn diagnostic(&self) -> Option<&AssessmentDiagnostic> {
        self.diagnostic.as_ref()
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Number of questions answered so far.
    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    /// Number of questions in the set.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the session still accepts responses and transitions.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionClosed,
                format!("Session is {} and no longer accepts changes", self.status),
            )
            .with_detail("session_id", self.id.to_string()))
        }
    }

    /// Returns true if a response for this question can still be recorded.
    pub fn can_record_response(&self, question_id: &QuestionId) -> bool {
        self.status.is_active()
            && self.questions.get(question_id).is_some()
            && !self.responses.iter().any(|r| r.question_id() == question_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a response.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session is completed or cancelled
    /// - `QuestionNotFound` if the question is not in the set
    /// - `DuplicateResponse` if the question was already answered
    /// - `ValidationFailed` if the response variant does not match the question
    pub fn record_response(&mut self, response: AssessmentResponse) -> Result<(), DomainError> {
        self.ensure_open()?;

        let question = self.questions.get(response.question_id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuestionNotFound,
                format!(
                    "Question '{}' is not part of this session",
                    response.question_id()
                ),
            )
        })?;
        if !response.matches_question(question) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Response type does not match question '{}'",
                    response.question_id()
                ),
            ));
        }
        if self
            .responses
            .iter()
            .any(|r| r.question_id() == response.question_id())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateResponse,
                format!(
                    "A response for question '{}' was already recorded",
                    response.question_id()
                ),
            ));
        }

        self.responses.push(response);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attaches the computed diagnostic and adopts its level as the new
    /// target level. Persistence adapters call this before the status flip.
    pub fn attach_diagnostic(&mut self, diagnostic: AssessmentDiagnostic) {
        self.target_level = Some(diagnostic.overall.level);
        self.diagnostic = Some(diagnostic);
        self.updated_at = Timestamp::now();
    }

    /// Applies a status transition.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the move is not allowed
    /// - `ValidationFailed` if `completed_at` predates `started_at`
    pub fn set_status(
        &mut self,
        status: SessionStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&status) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition session from {} to {}", self.status, status),
            )
            .with_detail("session_id", self.id.to_string()));
        }
        if let Some(completed_at) = &completed_at {
            if completed_at.is_before(&self.started_at) {
                return Err(DomainError::new(
                    ErrorCode::ValidationFailed,
                    "completed_at cannot predate started_at",
                ));
            }
        }
        self.status = status;
        self.completed_at = completed_at;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Closes the session with its diagnostic, exactly once.
    pub fn complete(&mut self, diagnostic: AssessmentDiagnostic) -> Result<(), DomainError> {
        // Transition check first so a closed session is left untouched.
        if !self.status.can_transition_to(&SessionStatus::Completed) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot complete a {} session", self.status),
            ));
        }
        self.attach_diagnostic(diagnostic);
        self.set_status(SessionStatus::Completed, Some(Timestamp::now()))
    }

    /// Cancels the session.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.set_status(SessionStatus::Cancelled, None)
    }
}
