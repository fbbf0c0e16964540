//! StartAssessmentHandler - opens (or resumes) a session for a blueprint.

use std::sync::Arc;

use tracing::info;

use crate::application::errors::AssessmentError;
use crate::domain::assessment::{AssessmentSession, AssessmentStarted};
use crate::domain::foundation::{BlueprintId, CefrLevel, SessionId, UserId};
use crate::ports::{BlueprintProvider, RetentionEventEmitter, SessionRepository};

/// Command to start an assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentCommand {
    pub user_id: UserId,
    pub blueprint_id: BlueprintId,
    /// The level the learner believes they are at, if known.
    pub target_level: Option<CefrLevel>,
}

/// Result of starting an assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session: AssessmentSession,
    /// True when an existing open session was returned instead of a new one.
    pub resumed: bool,
}

pub struct StartAssessmentHandler {
    blueprints: Arc<dyn BlueprintProvider>,
    sessions: Arc<dyn SessionRepository>,
    events: Arc<dyn RetentionEventEmitter>,
}

impl StartAssessmentHandler {
    pub fn new(
        blueprints: Arc<dyn BlueprintProvider>,
        sessions: Arc<dyn SessionRepository>,
        events: Arc<dyn RetentionEventEmitter>,
    ) -> Self {
        Self {
            blueprints,
            sessions,
            events,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, AssessmentError> {
        // Starting is idempotent per user: at most one open session exists,
        // whatever blueprint it was opened against, and no event is
        // re-emitted on resume.
        if let Some(existing) = self.sessions.find_active_by_user(&cmd.user_id).await? {
            info!(session_id = %existing.id(), "resuming open assessment session");
            return Ok(StartAssessmentResult {
                session: existing,
                resumed: true,
            });
        }

        let blueprint = self
            .blueprints
            .find_by_id(&cmd.blueprint_id)
            .await?
            .ok_or_else(|| AssessmentError::BlueprintNotFound(cmd.blueprint_id.to_string()))?;

        let session = AssessmentSession::start(
            SessionId::new(),
            cmd.user_id.clone(),
            cmd.blueprint_id.clone(),
            blueprint.questions().clone(),
            cmd.target_level,
        );
        self.sessions.create(&session).await?;

        self.events
            .emit_event(&AssessmentStarted {
                session_id: *session.id(),
                user_id: cmd.user_id,
                blueprint_id: cmd.blueprint_id,
                question_count: session.question_count(),
            })
            .await;

        info!(session_id = %session.id(), "assessment session started");
        Ok(StartAssessmentResult {
            session,
            resumed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryRetentionEmitter;
    use crate::adapters::memory::{InMemoryBlueprintProvider, InMemorySessionRepository};
    use crate::application::handlers::testing::{blueprint_with_id, placement_blueprint};
    use crate::domain::assessment::ASSESSMENT_STARTED;
    use crate::domain::foundation::SessionStatus;

    fn command() -> StartAssessmentCommand {
        StartAssessmentCommand {
            user_id: UserId::new("learner-1").unwrap(),
            blueprint_id: BlueprintId::new("placement-v1").unwrap(),
            target_level: None,
        }
    }

    fn handler_with_blueprint() -> (
        StartAssessmentHandler,
        Arc<InMemorySessionRepository>,
        Arc<InMemoryRetentionEmitter>,
    ) {
        let blueprints = Arc::new(InMemoryBlueprintProvider::with_blueprint(
            placement_blueprint(),
        ));
        blueprints.insert(blueprint_with_id("level-check-v2"));
        let sessions = Arc::new(InMemorySessionRepository::new());
        let events = Arc::new(InMemoryRetentionEmitter::new());
        let handler =
            StartAssessmentHandler::new(blueprints, sessions.clone(), events.clone());
        (handler, sessions, events)
    }

    #[tokio::test]
    async fn starts_session_from_blueprint() {
        let (handler, sessions, events) = handler_with_blueprint();

        let result = handler.handle(command()).await.unwrap();
        assert!(!result.resumed);
        assert_eq!(result.session.status(), SessionStatus::InProgress);
        assert_eq!(result.session.question_count(), 3);

        let stored = sessions.find_by_id(result.session.id()).await.unwrap();
        assert!(stored.is_some());
        assert_eq!(events.count_of(ASSESSMENT_STARTED), 1);
    }

    #[tokio::test]
    async fn resumes_open_session_without_new_event() {
        let (handler, _sessions, events) = handler_with_blueprint();

        let first = handler.handle(command()).await.unwrap();
        let second = handler.handle(command()).await.unwrap();

        assert!(second.resumed);
        assert_eq!(first.session.id(), second.session.id());
        assert_eq!(events.count_of(ASSESSMENT_STARTED), 1);
    }

    #[tokio::test]
    async fn resumes_open_session_started_on_another_blueprint() {
        let (handler, _sessions, events) = handler_with_blueprint();

        let first = handler.handle(command()).await.unwrap();
        let mut cmd = command();
        cmd.blueprint_id = BlueprintId::new("level-check-v2").unwrap();
        let second = handler.handle(cmd).await.unwrap();

        // one open session per user, whichever blueprint is asked for
        assert!(second.resumed);
        assert_eq!(first.session.id(), second.session.id());
        assert_eq!(
            second.session.blueprint_id(),
            &BlueprintId::new("placement-v1").unwrap()
        );
        assert_eq!(events.count_of(ASSESSMENT_STARTED), 1);
    }

    #[tokio::test]
    async fn fails_for_unknown_blueprint() {
        let blueprints = Arc::new(InMemoryBlueprintProvider::new());
        let handler = StartAssessmentHandler::new(
            blueprints,
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryRetentionEmitter::new()),
        );

        let result = handler.handle(command()).await;
        assert!(matches!(result, Err(AssessmentError::BlueprintNotFound(_))));
    }

    #[tokio::test]
    async fn keeps_requested_target_level() {
        let (handler, _, _) = handler_with_blueprint();
        let mut cmd = command();
        cmd.target_level = Some(CefrLevel::B1);
        let result = handler.handle(cmd).await.unwrap();
        assert_eq!(result.session.target_level(), Some(CefrLevel::B1));
    }
}
