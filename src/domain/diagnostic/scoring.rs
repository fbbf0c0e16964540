//! Weighted score breakdown and coverage-based confidence policy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::assessment::{AssessmentResponse, QuestionSet};
use crate::domain::foundation::{QuestionId, Score, Skill};

use super::profile::Confidence;

/// Weighted score accumulated for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub skill: Skill,
    /// Weighted mean score for this skill, two decimals.
    pub score: f64,
    /// Total weight of this skill's questions.
    pub weight_total: f64,
    /// Weight of this skill's answered questions.
    pub weight_answered: f64,
}

/// Result of scoring a question set against collected responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Overall weighted mean score, two decimals, always in [0, 100].
    pub overall_score: f64,
    /// Sum of all question weights.
    pub total_weight: f64,
    /// Sum of weights of answered questions.
    pub answered_weight: f64,
    /// Number of responses that matched a question and were evaluated.
    pub evaluated_responses: usize,
    /// Per-skill breakdowns, in skill presentation order.
    pub skills: Vec<SkillBreakdown>,
}

impl ScoreBreakdown {
    /// Fraction of assessment weight covered by answers, in [0, 1].
    pub fn coverage(&self) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        self.answered_weight / self.total_weight
    }
}

/// Computes the weighted score breakdown for a question set.
///
/// Pure: same inputs always produce the same output. A question without a
/// response contributes a score of 0 but its weight still counts toward
/// both the overall and its skill's denominator, so unanswered questions
/// drag the mean down rather than vanishing. Response scores are clamped
/// into [0, 100] before weighting.
pub fn compute_score_breakdown(
    questions: &QuestionSet,
    responses: &[AssessmentResponse],
) -> ScoreBreakdown {
    let by_question: HashMap<&QuestionId, &AssessmentResponse> =
        responses.iter().map(|r| (r.question_id(), r)).collect();

    struct SkillAcc {
        weighted_sum: f64,
        weight_total: f64,
        weight_answered: f64,
    }

    let mut skills: HashMap<Skill, SkillAcc> = HashMap::new();
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut answered_weight = 0.0;
    let mut evaluated_responses = 0;

    for question in questions.iter() {
        let weight = question.weight().value();
        let response = by_question.get(question.id());
        let score = match response {
            Some(response) => {
                evaluated_responses += 1;
                answered_weight += weight;
                response
                    .score()
                    .map(|s| s.value().clamp(0.0, 100.0))
                    .unwrap_or(0.0)
            }
            None => 0.0,
        };

        weighted_sum += score * weight;
        total_weight += weight;

        let acc = skills.entry(question.skill()).or_insert(SkillAcc {
            weighted_sum: 0.0,
            weight_total: 0.0,
            weight_answered: 0.0,
        });
        acc.weighted_sum += score * weight;
        acc.weight_total += weight;
        if response.is_some() {
            acc.weight_answered += weight;
        }
    }

    let overall_score = if total_weight > 0.0 {
        Score::clamped(weighted_sum / total_weight).value()
    } else {
        0.0
    };

    // Deterministic skill order regardless of HashMap iteration.
    let skill_breakdowns = Skill::ALL
        .iter()
        .filter_map(|skill| {
            skills.get(skill).map(|acc| SkillBreakdown {
                skill: *skill,
                score: Score::clamped(acc.weighted_sum / acc.weight_total).value(),
                weight_total: acc.weight_total,
                weight_answered: acc.weight_answered,
            })
        })
        .collect();

    ScoreBreakdown {
        overall_score,
        total_weight,
        answered_weight,
        evaluated_responses,
        skills: skill_breakdowns,
    }
}

/// Coverage thresholds mapping answered weight to diagnostic confidence.
///
/// These numbers are product policy, not a law of scoring: they live here
/// as an adjustable value rather than constants inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Coverage at or above this is high confidence.
    pub high_coverage: f64,
    /// Coverage at or above this (but below high) is medium confidence.
    pub medium_coverage: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            high_coverage: 0.85,
            medium_coverage: 0.60,
        }
    }
}

impl ConfidencePolicy {
    /// Infers confidence from a breakdown's weight coverage.
    pub fn infer(&self, breakdown: &ScoreBreakdown) -> Confidence {
        let coverage = breakdown.coverage();
        if coverage >= self.high_coverage {
            Confidence::High
        } else if coverage >= self.medium_coverage {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}
