//! FinalizeAssessmentHandler - closes a session and produces its diagnostic.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::errors::AssessmentError;
use crate::domain::assessment::AssessmentCompleted;
use crate::domain::diagnostic::{
    build_diagnostic, compute_score_breakdown, AssessmentDiagnostic, ConfidencePolicy,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, SessionStatus, Timestamp,
};
use crate::ports::{RetentionEventEmitter, SessionRepository, UserRepository};

/// Command to finalize a session.
#[derive(Debug, Clone)]
pub struct FinalizeAssessmentCommand {
    pub session_id: SessionId,
}

/// Result of finalizing a session.
#[derive(Debug, Clone)]
pub struct FinalizeAssessmentResult {
    pub diagnostic: AssessmentDiagnostic,
    /// False when the session was already completed and the stored
    /// diagnostic was returned.
    pub newly_completed: bool,
}

pub struct FinalizeAssessmentHandler {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    events: Arc<dyn RetentionEventEmitter>,
    policy: ConfidencePolicy,
}

impl FinalizeAssessmentHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn RetentionEventEmitter>,
        policy: ConfidencePolicy,
    ) -> Self {
        Self {
            sessions,
            users,
            events,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeAssessmentCommand,
    ) -> Result<FinalizeAssessmentResult, AssessmentError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| AssessmentError::SessionNotFound(cmd.session_id.to_string()))?;

        // Finalizing twice returns the stored outcome, with no new event.
        if session.status() == SessionStatus::Completed {
            let diagnostic = session.diagnostic().cloned().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InternalError,
                    "Completed session has no stored diagnostic",
                )
            })?;
            return Ok(FinalizeAssessmentResult {
                diagnostic,
                newly_completed: false,
            });
        }
        session.ensure_open()?;

        let breakdown = compute_score_breakdown(session.questions(), session.responses());
        let diagnostic = build_diagnostic(&breakdown, &self.policy)?;
        let level = diagnostic.overall.level;

        self.sessions
            .save_diagnostic(&cmd.session_id, &diagnostic, level)
            .await?;
        self.sessions
            .update_status(
                &cmd.session_id,
                SessionStatus::Completed,
                Some(Timestamp::now()),
            )
            .await?;

        self.events
            .emit_event(&AssessmentCompleted {
                session_id: cmd.session_id,
                user_id: session.user_id().clone(),
                level,
                score: diagnostic.overall.score,
            })
            .await;

        // Best effort: the session outcome is already durable, so a profile
        // update failure is logged and swallowed.
        if let Err(error) = self.update_profile(&session, level).await {
            warn!(
                session_id = %cmd.session_id,
                %error,
                "failed to update learner profile with assessed level"
            );
        }

        info!(
            session_id = %cmd.session_id,
            level = %level,
            score = diagnostic.overall.score,
            "assessment finalized"
        );
        Ok(FinalizeAssessmentResult {
            diagnostic,
            newly_completed: true,
        })
    }

    async fn update_profile(
        &self,
        session: &crate::domain::assessment::AssessmentSession,
        level: crate::domain::foundation::CefrLevel,
    ) -> Result<(), DomainError> {
        let Some(mut profile) = self.users.find_by_id(session.user_id()).await? else {
            warn!(user_id = %session.user_id(), "no learner profile to update");
            return Ok(());
        };
        profile.proficiency_level = Some(level);
        profile.updated_at = Timestamp::now();
        self.users.save(&profile).await
    }
}
