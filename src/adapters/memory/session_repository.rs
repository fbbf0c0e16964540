//! In-memory session store.
//!
//! `append_response` runs the aggregate's own guards under a single write
//! lock, so the one-response-per-question rule holds even under
//! concurrent appends.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::assessment::{AssessmentResponse, AssessmentSession};
use crate::domain::diagnostic::AssessmentDiagnostic;
use crate::domain::foundation::{
    CefrLevel, DomainError, ErrorCode, SessionId, SessionStatus, Timestamp, UserId,
};
use crate::ports::SessionRepository;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, AssessmentSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> DomainError {
        DomainError::new(ErrorCode::RepositoryError, "Session store lock poisoned")
    }

    fn not_found(id: &SessionId) -> DomainError {
        DomainError::new(
            ErrorCode::SessionNotFound,
            format!("Session '{}' not found", id),
        )
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AssessmentSession>, DomainError> {
        let guard = self.sessions.read().map_err(|_| Self::lock_error())?;
        Ok(guard.get(id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        let guard = self.sessions.read().map_err(|_| Self::lock_error())?;
        Ok(guard
            .values()
            .find(|s| s.user_id() == user_id && s.status().is_active())
            .cloned())
    }

    async fn create(&self, session: &AssessmentSession) -> Result<(), DomainError> {
        let mut guard = self.sessions.write().map_err(|_| Self::lock_error())?;
        if guard.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::RepositoryError,
                format!("Session '{}' already exists", session.id()),
            ));
        }
        guard.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn append_response(
        &self,
        id: &SessionId,
        response: AssessmentResponse,
    ) -> Result<AssessmentSession, DomainError> {
        let mut guard = self.sessions.write().map_err(|_| Self::lock_error())?;
        let session = guard.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        session.record_response(response)?;
        Ok(session.clone())
    }

    async fn update_status(
        &self,
        id: &SessionId,
        status: SessionStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<(), DomainError> {
        let mut guard = self.sessions.write().map_err(|_| Self::lock_error())?;
        let session = guard.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        session.set_status(status, completed_at)
    }

    async fn save_diagnostic(
        &self,
        id: &SessionId,
        diagnostic: &AssessmentDiagnostic,
        _target_level: CefrLevel,
    ) -> Result<(), DomainError> {
        let mut guard = self.sessions.write().map_err(|_| Self::lock_error())?;
        let session = guard.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        session.attach_diagnostic(diagnostic.clone());
        Ok(())
    }
}
