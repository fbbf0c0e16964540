//! Rubric-based evaluation provider port.
//!
//! The domain criterion is flattened into a provider-neutral description
//! so adapters never depend on aggregate internals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::domain::assessment::AssessmentCriterion;
use crate::domain::foundation::{CefrLevel, CriterionId, Skill};

use super::provider_error::ProviderError;

/// One scored band of a criterion, as presented to the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricBand {
    pub label: String,
    pub min_score: f64,
    pub max_score: f64,
    pub text: String,
}

/// A flattened criterion handed to the evaluation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDescription {
    pub criterion_id: CriterionId,
    pub title: String,
    pub focus: String,
    pub skill: Skill,
    pub bands: Vec<RubricBand>,
}

impl From<&AssessmentCriterion> for RubricDescription {
    fn from(criterion: &AssessmentCriterion) -> Self {
        Self {
            criterion_id: criterion.id().clone(),
            title: criterion.title().to_string(),
            focus: criterion.focus().to_string(),
            skill: criterion.skill(),
            bands: criterion
                .descriptors()
                .iter()
                .map(|d| RubricBand {
                    label: d.level().label().to_string(),
                    min_score: d.min_score(),
                    max_score: d.max_score(),
                    text: d.text().to_string(),
                })
                .collect(),
        }
    }
}

/// Context accompanying a transcript into evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// The speaking prompt the learner answered.
    pub prompt: String,
    /// The level the question targets.
    pub target_level: CefrLevel,
    pub rubrics: Vec<RubricDescription>,
}

/// The provider's verdict on one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub criterion_id: CriterionId,
    /// 0-100 score for this criterion.
    pub score: f64,
    pub feedback: Option<String>,
}

/// A full rubric evaluation of one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricEvaluation {
    /// 0-100 overall score for the answer.
    pub overall_score: f64,
    pub summary: Option<String>,
    pub criteria: Vec<CriterionEvaluation>,
}

/// Evaluates a transcript against rubric criteria.
#[async_trait]
pub trait RubricEvaluationProvider: Send + Sync {
    async fn evaluate(
        &self,
        transcript: String,
        context: EvaluationContext,
        cancellation: CancellationToken,
    ) -> Result<RubricEvaluation, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{PerformanceLevel, RubricDescriptor};

    #[test]
    fn description_flattens_criterion_bands_in_order() {
        let criterion = AssessmentCriterion::new(
            CriterionId::new("fluency").unwrap(),
            "Fluency",
            Skill::Speaking,
            "Pace and flow",
            25.0,
            vec![
                RubricDescriptor::new(PerformanceLevel::Mastery, 85.0, 100.0, "Effortless", vec![])
                    .unwrap(),
                RubricDescriptor::new(PerformanceLevel::Emerging, 0.0, 39.0, "Halting", vec![])
                    .unwrap(),
            ],
        )
        .unwrap();

        let description = RubricDescription::from(&criterion);
        assert_eq!(description.criterion_id.as_str(), "fluency");
        assert_eq!(description.bands.len(), 2);
        // criterion sorts its bands ascending by min score
        assert_eq!(description.bands[0].label, "Emerging");
        assert_eq!(description.bands[1].label, "Mastery");
    }
}
