//! Learner response value objects, mirroring the question union.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{CriterionId, QuestionId, Score, Timestamp, ValidationError};

use super::question::AssessmentQuestion;

/// Score awarded for one rubric criterion of a speaking answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion_id: CriterionId,
    pub score: Score,
    pub feedback: Option<String>,
}

/// A recorded learner response.
///
/// Variants mirror the question union; a response is only valid for a
/// question of the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentResponse {
    MultipleChoice {
        question_id: QuestionId,
        submitted_at: Timestamp,
        score: Option<Score>,
        selected_option_ids: Vec<String>,
        confidence: Option<f64>,
    },
    Listening {
        question_id: QuestionId,
        submitted_at: Timestamp,
        score: Option<Score>,
        selected_option_ids: Vec<String>,
        confidence: Option<f64>,
    },
    Speaking {
        question_id: QuestionId,
        submitted_at: Timestamp,
        score: Option<Score>,
        transcript: String,
        audio_ref: Option<String>,
        criterion_scores: Vec<CriterionScore>,
    },
}

impl AssessmentResponse {
    /// Builds a choice response for a multiple-choice or listening question,
    /// scoring it by option overlap.
    ///
    /// # Errors
    ///
    /// - the question is a speaking question
    /// - a selected id is not one of the question's options
    /// - confidence is outside [0, 1]
    pub fn choice(
        question: &AssessmentQuestion,
        selected_option_ids: Vec<String>,
        confidence: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let correct = question.correct_option_ids().ok_or_else(|| {
            ValidationError::invalid_format(
                "question_id",
                "a speaking question cannot take a choice response",
            )
        })?;
        let option_ids: HashSet<&str> = question
            .option_ids()
            .unwrap_or_default()
            .into_iter()
            .collect();
        let mut seen = HashSet::new();
        for id in &selected_option_ids {
            if !option_ids.contains(id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "selected_option_ids",
                    format!("'{}' is not one of the question's options", id),
                ));
            }
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::duplicate("selected_option_ids", id));
            }
        }
        if let Some(confidence) = confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ValidationError::out_of_range(
                    "confidence", 0.0, 1.0, confidence,
                ));
            }
        }

        let score = score_option_overlap(correct, &selected_option_ids);
        let question_id = question.id().clone();
        let submitted_at = Timestamp::now();
        Ok(match question {
            AssessmentQuestion::MultipleChoice { .. } => AssessmentResponse::MultipleChoice {
                question_id,
                submitted_at,
                score: Some(score),
                selected_option_ids,
                confidence,
            },
            AssessmentQuestion::Listening { .. } => AssessmentResponse::Listening {
                question_id,
                submitted_at,
                score: Some(score),
                selected_option_ids,
                confidence,
            },
            AssessmentQuestion::Speaking { .. } => unreachable!("guarded above"),
        })
    }

    /// Builds a speaking response from a transcript and rubric evaluation.
    ///
    /// # Errors
    ///
    /// - transcript is empty or whitespace
    pub fn speaking(
        question_id: QuestionId,
        transcript: impl Into<String>,
        audio_ref: Option<String>,
        criterion_scores: Vec<CriterionScore>,
        overall_score: f64,
    ) -> Result<Self, ValidationError> {
        let transcript = transcript.into();
        if transcript.trim().is_empty() {
            return Err(ValidationError::empty_field("transcript"));
        }
        Ok(AssessmentResponse::Speaking {
            question_id,
            submitted_at: Timestamp::now(),
            score: Some(Score::clamped(overall_score)),
            transcript,
            audio_ref,
            criterion_scores,
        })
    }

    pub fn question_id(&self) -> &QuestionId {
        match self {
            AssessmentResponse::MultipleChoice { question_id, .. }
            | AssessmentResponse::Listening { question_id, .. }
            | AssessmentResponse::Speaking { question_id, .. } => question_id,
        }
    }

    pub fn submitted_at(&self) -> Timestamp {
        match self {
            AssessmentResponse::MultipleChoice { submitted_at, .. }
            | AssessmentResponse::Listening { submitted_at, .. }
            | AssessmentResponse::Speaking { submitted_at, .. } => *submitted_at,
        }
    }

    pub fn score(&self) -> Option<Score> {
        match self {
            AssessmentResponse::MultipleChoice { score, .. }
            | AssessmentResponse::Listening { score, .. }
            | AssessmentResponse::Speaking { score, .. } => *score,
        }
    }

    /// Returns true if this response variant matches the question variant.
    pub fn matches_question(&self, question: &AssessmentQuestion) -> bool {
        matches!(
            (self, question),
            (
                AssessmentResponse::MultipleChoice { .. },
                AssessmentQuestion::MultipleChoice { .. }
            ) | (
                AssessmentResponse::Listening { .. },
                AssessmentQuestion::Listening { .. }
            ) | (
                AssessmentResponse::Speaking { .. },
                AssessmentQuestion::Speaking { .. }
            )
        )
    }
}

/// Scores a choice selection by overlap with the correct set.
///
/// `hits` are selected correct options, `misses` are selected incorrect
/// options. A selection without false positives earns partial credit
/// against the full correct set; any false positive switches the
/// denominator to the selection itself, penalizing guessing wide.
pub fn score_option_overlap(correct: &[String], selected: &[String]) -> Score {
    let correct_set: HashSet<&str> = correct.iter().map(String::as_str).collect();
    let hits = selected
        .iter()
        .filter(|id| correct_set.contains(id.as_str()))
        .count();
    let misses = selected.len() - hits;

    if hits == 0 && misses == 0 {
        return Score::ZERO;
    }
    let raw = if misses == 0 {
        100.0 * hits as f64 / correct.len() as f64
    } else {
        100.0 * hits as f64 / (hits + misses) as f64
    };
    Score::clamped(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CefrLevel, Skill};
    use crate::domain::assessment::question::AnswerOption;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn mcq_three_options() -> AssessmentQuestion {
        AssessmentQuestion::multiple_choice(
            QuestionId::new("q1").unwrap(),
            "Pick all correct forms",
            Skill::Grammar,
            CefrLevel::B1,
            30.0,
            vec![],
            vec![
                AnswerOption::new("a", "Option A").unwrap(),
                AnswerOption::new("b", "Option B").unwrap(),
                AnswerOption::new("c", "Option C").unwrap(),
            ],
            strings(&["a", "b"]),
        )
        .unwrap()
    }

    // Overlap scoring

    #[test]
    fn exact_match_scores_full_marks() {
        let score = score_option_overlap(&strings(&["a", "b"]), &strings(&["b", "a"]));
        assert_eq!(score.value(), 100.0);
    }

    #[test]
    fn partial_correct_without_false_positives() {
        let score = score_option_overlap(&strings(&["a", "b"]), &strings(&["a"]));
        assert_eq!(score.value(), 50.0);
    }

    #[test]
    fn false_positives_switch_denominator() {
        // one hit, one miss: 100 * 1 / 2
        let score = score_option_overlap(&strings(&["a", "b", "c"]), &strings(&["a", "x"]));
        assert_eq!(score.value(), 50.0);
    }

    #[test]
    fn all_wrong_scores_zero() {
        let score = score_option_overlap(&strings(&["a"]), &strings(&["b", "c"]));
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn empty_selection_scores_zero() {
        let score = score_option_overlap(&strings(&["a"]), &[]);
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn thirds_round_to_two_decimals() {
        let score = score_option_overlap(&strings(&["a", "b", "c"]), &strings(&["a"]));
        assert_eq!(score.value(), 33.33);
    }

    // Choice response construction

    #[test]
    fn choice_response_scores_and_tags_variant() {
        let question = mcq_three_options();
        let response =
            AssessmentResponse::choice(&question, strings(&["a", "b"]), Some(0.8)).unwrap();
        assert!(matches!(response, AssessmentResponse::MultipleChoice { .. }));
        assert_eq!(response.score().unwrap().value(), 100.0);
        assert!(response.matches_question(&question));
    }

    #[test]
    fn choice_response_rejects_unknown_option() {
        let question = mcq_three_options();
        let result = AssessmentResponse::choice(&question, strings(&["z"]), None);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn choice_response_rejects_duplicate_selection() {
        let question = mcq_three_options();
        let result = AssessmentResponse::choice(&question, strings(&["a", "a"]), None);
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn choice_response_rejects_out_of_range_confidence() {
        let question = mcq_three_options();
        let result = AssessmentResponse::choice(&question, strings(&["a"]), Some(1.5));
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn choice_response_rejects_speaking_question() {
        let question = AssessmentQuestion::speaking(
            QuestionId::new("q2").unwrap(),
            "Describe",
            CefrLevel::B2,
            40.0,
            vec![],
            "Describe your day.",
            vec![CriterionId::new("fluency").unwrap()],
        )
        .unwrap();
        let result = AssessmentResponse::choice(&question, strings(&["a"]), None);
        assert!(result.is_err());
    }

    // Speaking response construction

    #[test]
    fn speaking_response_rounds_overall_score() {
        let response = AssessmentResponse::speaking(
            QuestionId::new("q2").unwrap(),
            "I grew up in a small town near the coast.",
            Some("audio://take-1".to_string()),
            vec![],
            61.666,
        )
        .unwrap();
        assert_eq!(response.score().unwrap().value(), 61.67);
    }

    #[test]
    fn speaking_response_rejects_blank_transcript() {
        let result = AssessmentResponse::speaking(
            QuestionId::new("q2").unwrap(),
            "   ",
            None,
            vec![],
            50.0,
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { field }) if field == "transcript"));
    }
}
