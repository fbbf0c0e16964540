//! Assessment session persistence port.

use async_trait::async_trait;

use crate::domain::assessment::{AssessmentResponse, AssessmentSession};
use crate::domain::diagnostic::AssessmentDiagnostic;
use crate::domain::foundation::{
    CefrLevel, DomainError, SessionId, SessionStatus, Timestamp, UserId,
};

/// Durable storage for assessment sessions.
///
/// `append_response` must enforce at-most-one-response-per-question
/// atomically: two concurrent appends for the same question must not both
/// succeed.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AssessmentSession>, DomainError>;

    /// The user's open session, if one exists. A user holds at most one
    /// active session at a time, across all blueprints.
    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError>;

    async fn create(&self, session: &AssessmentSession) -> Result<(), DomainError>;

    /// Appends a response, enforcing uniqueness per question, and returns
    /// the updated session.
    async fn append_response(
        &self,
        id: &SessionId,
        response: AssessmentResponse,
    ) -> Result<AssessmentSession, DomainError>;

    async fn update_status(
        &self,
        id: &SessionId,
        status: SessionStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<(), DomainError>;

    /// Stores the diagnostic and the level it assigned.
    async fn save_diagnostic(
        &self,
        id: &SessionId,
        diagnostic: &AssessmentDiagnostic,
        target_level: CefrLevel,
    ) -> Result<(), DomainError>;
}
