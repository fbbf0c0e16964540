//! SpeakingPipelineHandler - transcribes and evaluates a spoken answer.
//!
//! The pipeline is transcription, then rubric evaluation, then recording
//! the scored response. Both provider calls run under the deadline and
//! cancellation wrapper; a failure at either stage emits one degradation
//! event and surfaces the provider error unchanged.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::errors::AssessmentError;
use crate::application::remote_call::{execute_remote_call, RemoteCallOptions};
use crate::config::AiConfig;
use crate::domain::assessment::{
    AiDegraded, AssessmentQuestion, AssessmentResponse, AssessmentSession, CriterionScore,
    ResponseRecorded,
};
use crate::domain::foundation::{
    ErrorCode, QuestionId, Score, SessionId, ValidationError,
};
use crate::ports::{
    BlueprintProvider, EvaluationContext, ProviderError, RetentionEventEmitter,
    RubricDescription, RubricEvaluation, RubricEvaluationProvider, SessionRepository,
    Transcription, TranscriptionProvider, TranscriptionRequest,
};

/// Command to process a recorded speaking answer.
#[derive(Debug, Clone)]
pub struct SpeakingPipelineCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    /// Opaque reference to the uploaded audio.
    pub audio_ref: String,
    pub locale_hint: Option<String>,
    /// External cancellation, e.g. from a dropped client connection.
    pub cancellation: Option<CancellationToken>,
}

/// Result of a completed speaking pipeline run.
#[derive(Debug, Clone)]
pub struct SpeakingPipelineResult {
    pub session: AssessmentSession,
    pub transcript: String,
    pub evaluation: RubricEvaluation,
}

pub struct SpeakingPipelineHandler {
    blueprints: Arc<dyn BlueprintProvider>,
    sessions: Arc<dyn SessionRepository>,
    transcription: Arc<dyn TranscriptionProvider>,
    evaluation: Arc<dyn RubricEvaluationProvider>,
    events: Arc<dyn RetentionEventEmitter>,
    config: AiConfig,
}

impl SpeakingPipelineHandler {
    pub fn new(
        blueprints: Arc<dyn BlueprintProvider>,
        sessions: Arc<dyn SessionRepository>,
        transcription: Arc<dyn TranscriptionProvider>,
        evaluation: Arc<dyn RubricEvaluationProvider>,
        events: Arc<dyn RetentionEventEmitter>,
        config: AiConfig,
    ) -> Self {
        Self {
            blueprints,
            sessions,
            transcription,
            evaluation,
            events,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: SpeakingPipelineCommand,
    ) -> Result<SpeakingPipelineResult, AssessmentError> {
        if cmd.audio_ref.trim().is_empty() {
            return Err(AssessmentError::Validation(ValidationError::empty_field(
                "audio_ref",
            )));
        }

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
        let (prompt, criterion_ids) = match question {
            AssessmentQuestion::Speaking {
                prompt,
                criterion_ids,
                ..
            } => (prompt.clone(), criterion_ids.clone()),
            _ => {
                return Err(AssessmentError::Validation(ValidationError::invalid_format(
                    "question_id",
                    "only speaking questions go through the speaking pipeline",
                )))
            }
        };
        let target_level = question.core().level();

        let blueprint = self
            .blueprints
            .find_by_id(session.blueprint_id())
            .await?
            .ok_or_else(|| {
                AssessmentError::BlueprintNotFound(session.blueprint_id().to_string())
            })?;
        let rubrics: Vec<RubricDescription> = blueprint
            .criteria_for(&criterion_ids)
            .into_iter()
            .map(RubricDescription::from)
            .collect();

        let transcription = match self.transcribe(&cmd, prompt.clone()).await {
            Ok(transcription) => transcription,
            Err(error) => return Err(self.degraded(&cmd, "transcription", error).await),
        };
        let transcript = transcription.transcript;

        let context = EvaluationContext {
            prompt,
            target_level,
            rubrics,
        };
        let evaluation = match self.evaluate(&cmd, transcript.clone(), context).await {
            Ok(evaluation) => evaluation,
            Err(error) => return Err(self.degraded(&cmd, "evaluation", error).await),
        };

        let criterion_scores = evaluation
            .criteria
            .iter()
            .map(|c| CriterionScore {
                criterion_id: c.criterion_id.clone(),
                score: Score::clamped(c.score),
                feedback: c.feedback.clone(),
            })
            .collect();
        let response = AssessmentResponse::speaking(
            cmd.question_id.clone(),
            transcript.clone(),
            Some(cmd.audio_ref.clone()),
            criterion_scores,
            evaluation.overall_score,
        )?;

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
            score = evaluation.overall_score,
            "speaking answer evaluated"
        );
        Ok(SpeakingPipelineResult {
            session,
            transcript,
            evaluation,
        })
    }

    async fn transcribe(
        &self,
        cmd: &SpeakingPipelineCommand,
        prompt: String,
    ) -> Result<Transcription, ProviderError> {
        let request = TranscriptionRequest {
            audio_ref: cmd.audio_ref.clone(),
            locale_hint: Some(
                cmd.locale_hint
                    .clone()
                    .unwrap_or_else(|| self.config.default_locale.clone()),
            ),
            prompt: Some(prompt),
        };
        let mut options = RemoteCallOptions::with_deadline(self.config.transcription_deadline());
        if let Some(token) = &cmd.cancellation {
            options = options.cancelled_by(token.clone());
        }
        let provider = Arc::clone(&self.transcription);
        execute_remote_call("transcribe_audio", options, move |cancel| async move {
            provider.transcribe(request, cancel).await
        })
        .await
    }

    async fn evaluate(
        &self,
        cmd: &SpeakingPipelineCommand,
        transcript: String,
        context: EvaluationContext,
    ) -> Result<RubricEvaluation, ProviderError> {
        let mut options = RemoteCallOptions::with_deadline(self.config.evaluation_deadline());
        if let Some(token) = &cmd.cancellation {
            options = options.cancelled_by(token.clone());
        }
        let provider = Arc::clone(&self.evaluation);
        execute_remote_call("evaluate_transcript", options, move |cancel| async move {
            provider.evaluate(transcript, context, cancel).await
        })
        .await
    }

    /// Logs the failed stage, emits one degradation event, and passes the
    /// provider error through.
    async fn degraded(
        &self,
        cmd: &SpeakingPipelineCommand,
        stage: &str,
        error: ProviderError,
    ) -> AssessmentError {
        warn!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            stage,
            %error,
            "speaking pipeline degraded by provider failure"
        );
        self.events
            .emit_event(&AiDegraded {
                session_id: cmd.session_id,
                question_id: cmd.question_id.clone(),
                stage: stage.to_string(),
                error_kind: error.kind.as_code().to_string(),
            })
            .await;
        AssessmentError::Provider(error)
    }
}
