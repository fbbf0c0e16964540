//! SubmitResponseHandler - records a choice-based answer.

use std::sync::Arc;

use tracing::info;

use crate::application::errors::AssessmentError;
use crate::domain::assessment::{AssessmentResponse, AssessmentSession, ResponseRecorded};
use crate::domain::foundation::{ErrorCode, QuestionId, SessionId, ValidationError};
use crate::ports::{RetentionEventEmitter, SessionRepository};

/// Command to answer a multiple-choice or listening question.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub selected_option_ids: Vec<String>,
    /// The learner's self-reported confidence in [0, 1], if collected.
    pub confidence: Option<f64>,
}

/// Result of recording a response.
#[derive(Debug, Clone)]
pub struct SubmitResponseResult {
    pub session: AssessmentSession,
    /// The score the answer earned.
    pub score: f64,
}

pub struct SubmitResponseHandler {
    sessions: Arc<dyn SessionRepository>,
    events: Arc<dyn RetentionEventEmitter>,
}

impl SubmitResponseHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        events: Arc<dyn RetentionEventEmitter>,
    ) -> Self {
        Self { sessions, events }
    }

    pub async fn handle(
        &self,
        cmd: SubmitResponseCommand,
    ) -> Result<SubmitResponseResult, AssessmentError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| AssessmentError::SessionNotFound(cmd.session_id.to_string()))?;
        session.ensure_open()?;

        let question = session
            .questions()
            .get(&cmd.question_id)
            .ok_or_else(|| AssessmentError::QuestionNotFound(cmd.question_id.to_string()))?;
        if question.is_speaking() {
            return Err(AssessmentError::Validation(ValidationError::invalid_format(
                "question_id",
                "speaking questions go through the speaking pipeline",
            )));
        }

        let response =
            AssessmentResponse::choice(question, cmd.selected_option_ids, cmd.confidence)?;
        let score = response.score().map(|s| s.value()).unwrap_or(0.0);

        // The repository enforces one-response-per-question atomically;
        // the pre-checks above only shortcut the obvious failures.
        let session = self
            .sessions
            .append_response(&cmd.session_id, response)
            .await
            .map_err(|err| {
                if err.code == ErrorCode::DuplicateResponse {
                    AssessmentError::DuplicateResponse(cmd.question_id.to_string())
                } else {
                    AssessmentError::Domain(err)
                }
            })?;

        self.events
            .emit_event(&ResponseRecorded {
                session_id: cmd.session_id,
                question_id: cmd.question_id,
                answered: session.answered_count(),
                total: session.question_count(),
            })
            .await;

        info!(
            session_id = %cmd.session_id,
            answered = session.answered_count(),
            total = session.question_count(),
            "response recorded"
        );
        Ok(SubmitResponseResult { session, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryRetentionEmitter;
    use crate::adapters::memory::InMemorySessionRepository;
    use crate::application::handlers::testing::{in_progress_session, qid};
    use crate::domain::assessment::ASSESSMENT_RESPONSE_RECORDED;

    async fn setup() -> (
        SubmitResponseHandler,
        Arc<InMemorySessionRepository>,
        Arc<InMemoryRetentionEmitter>,
        SessionId,
    ) {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let events = Arc::new(InMemoryRetentionEmitter::new());
        let session = in_progress_session();
        let id = *session.id();
        sessions.create(&session).await.unwrap();
        let handler = SubmitResponseHandler::new(sessions.clone(), events.clone());
        (handler, sessions, events, id)
    }

    fn command(session_id: SessionId, question: &str, selected: &[&str]) -> SubmitResponseCommand {
        SubmitResponseCommand {
            session_id,
            question_id: qid(question),
            selected_option_ids: selected.iter().map(|s| s.to_string()).collect(),
            confidence: None,
        }
    }

    #[tokio::test]
    async fn records_correct_answer_with_full_score() {
        let (handler, _, events, id) = setup().await;
        let result = handler.handle(command(id, "q1", &["b"])).await.unwrap();
        assert_eq!(result.score, 100.0);
        assert_eq!(result.session.answered_count(), 1);
        assert_eq!(events.count_of(ASSESSMENT_RESPONSE_RECORDED), 1);
    }

    #[tokio::test]
    async fn records_wrong_answer_with_zero_score() {
        let (handler, _, _, id) = setup().await;
        let result = handler.handle(command(id, "q1", &["a"])).await.unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[tokio::test]
    async fn rejects_duplicate_answer() {
        let (handler, _, events, id) = setup().await;
        handler.handle(command(id, "q1", &["b"])).await.unwrap();
        let result = handler.handle(command(id, "q1", &["a"])).await;
        assert!(matches!(result, Err(AssessmentError::DuplicateResponse(_))));
        assert_eq!(events.count_of(ASSESSMENT_RESPONSE_RECORDED), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_session() {
        let (handler, _, _, _) = setup().await;
        let result = handler.handle(command(SessionId::new(), "q1", &["b"])).await;
        assert!(matches!(result, Err(AssessmentError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn rejects_unknown_question() {
        let (handler, _, _, id) = setup().await;
        let result = handler.handle(command(id, "ghost", &["b"])).await;
        assert!(matches!(result, Err(AssessmentError::QuestionNotFound(_))));
    }

    #[tokio::test]
    async fn refuses_speaking_question() {
        let (handler, _, _, id) = setup().await;
        let result = handler.handle(command(id, "q3", &["b"])).await;
        assert!(matches!(result, Err(AssessmentError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_invalid_option_id() {
        let (handler, _, events, id) = setup().await;
        let result = handler.handle(command(id, "q1", &["zzz"])).await;
        assert!(matches!(result, Err(AssessmentError::Validation(_))));
        assert_eq!(events.count_of(ASSESSMENT_RESPONSE_RECORDED), 0);
    }

    #[tokio::test]
    async fn rejects_closed_session() {
        let (handler, sessions, _, id) = setup().await;
        sessions
            .update_status(&id, crate::domain::foundation::SessionStatus::Cancelled, None)
            .await
            .unwrap();
        let result = handler.handle(command(id, "q1", &["b"])).await;
        assert!(matches!(result, Err(AssessmentError::Domain(_))));
    }
}
