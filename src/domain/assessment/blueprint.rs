//! Assessment blueprint - the published definition a session is started from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{BlueprintId, CriterionId, ValidationError};

use super::criterion::AssessmentCriterion;
use super::question::QuestionSet;

/// A published assessment definition: a question set plus the rubric
/// criteria its speaking questions are evaluated against.
///
/// # Invariants
///
/// - criterion ids are unique
/// - every criterion id referenced by a speaking question resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBlueprint {
    id: BlueprintId,
    name: String,
    questions: QuestionSet,
    criteria: Vec<AssessmentCriterion>,
}

impl AssessmentBlueprint {
    pub fn new(
        id: BlueprintId,
        name: impl Into<String>,
        questions: QuestionSet,
        criteria: Vec<AssessmentCriterion>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let mut ids: HashSet<&CriterionId> = HashSet::new();
        for criterion in &criteria {
            if !ids.insert(criterion.id()) {
                return Err(ValidationError::duplicate("criteria", criterion.id().as_str()));
            }
        }

        for question in questions.iter() {
            if let Some(referenced) = question.criterion_ids() {
                for criterion_id in referenced {
                    if !ids.contains(criterion_id) {
                        return Err(ValidationError::invalid_format(
                            "criterion_ids",
                            format!(
                                "question '{}' references unknown criterion '{}'",
                                question.id(),
                                criterion_id
                            ),
                        ));
                    }
                }
            }
        }

        Ok(Self {
            id,
            name,
            questions,
            criteria,
        })
    }

    pub fn id(&self) -> &BlueprintId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn criteria(&self) -> &[AssessmentCriterion] {
        &self.criteria
    }

    /// Looks up a criterion by id.
    pub fn criterion(&self, id: &CriterionId) -> Option<&AssessmentCriterion> {
        self.criteria.iter().find(|c| c.id() == id)
    }

    /// Criteria referenced by a speaking question, in declaration order.
    pub fn criteria_for(&self, ids: &[CriterionId]) -> Vec<&AssessmentCriterion> {
        ids.iter().filter_map(|id| self.criterion(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::criterion::{PerformanceLevel, RubricDescriptor};
    use crate::domain::assessment::question::{AnswerOption, AssessmentQuestion};
    use crate::domain::foundation::{CefrLevel, QuestionId, Skill};

    fn criterion(id: &str) -> AssessmentCriterion {
        AssessmentCriterion::new(
            CriterionId::new(id).unwrap(),
            "Fluency",
            Skill::Speaking,
            "Pace and hesitation",
            25.0,
            vec![RubricDescriptor::new(
                PerformanceLevel::Proficient,
                0.0,
                100.0,
                "Speaks with natural pacing",
                vec![],
            )
            .unwrap()],
        )
        .unwrap()
    }

    fn mcq(id: &str) -> AssessmentQuestion {
        AssessmentQuestion::multiple_choice(
            QuestionId::new(id).unwrap(),
            "Question",
            Skill::Grammar,
            CefrLevel::B1,
            30.0,
            vec![],
            vec![
                AnswerOption::new("a", "A").unwrap(),
                AnswerOption::new("b", "B").unwrap(),
            ],
            vec!["a".to_string()],
        )
        .unwrap()
    }

    fn speaking(id: &str, criterion_id: &str) -> AssessmentQuestion {
        AssessmentQuestion::speaking(
            QuestionId::new(id).unwrap(),
            "Speak",
            CefrLevel::B1,
            40.0,
            vec![],
            "Describe your day.",
            vec![CriterionId::new(criterion_id).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn builds_blueprint_with_resolvable_criteria() {
        let blueprint = AssessmentBlueprint::new(
            BlueprintId::new("placement-v1").unwrap(),
            "Placement",
            QuestionSet::new(vec![mcq("q1"), speaking("q2", "fluency")]).unwrap(),
            vec![criterion("fluency")],
        )
        .unwrap();
        assert_eq!(blueprint.name(), "Placement");
        assert!(blueprint
            .criterion(&CriterionId::new("fluency").unwrap())
            .is_some());
    }

    #[test]
    fn rejects_blank_name() {
        let result = AssessmentBlueprint::new(
            BlueprintId::new("placement-v1").unwrap(),
            "  ",
            QuestionSet::new(vec![mcq("q1")]).unwrap(),
            vec![],
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn rejects_duplicate_criterion_ids() {
        let result = AssessmentBlueprint::new(
            BlueprintId::new("placement-v1").unwrap(),
            "Placement",
            QuestionSet::new(vec![mcq("q1")]).unwrap(),
            vec![criterion("fluency"), criterion("fluency")],
        );
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn rejects_dangling_criterion_reference() {
        let result = AssessmentBlueprint::new(
            BlueprintId::new("placement-v1").unwrap(),
            "Placement",
            QuestionSet::new(vec![speaking("q1", "ghost")]).unwrap(),
            vec![criterion("fluency")],
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn criteria_for_preserves_order() {
        let blueprint = AssessmentBlueprint::new(
            BlueprintId::new("placement-v1").unwrap(),
            "Placement",
            QuestionSet::new(vec![mcq("q1")]).unwrap(),
            vec![criterion("fluency"), criterion("accuracy")],
        )
        .unwrap();
        let ids = vec![
            CriterionId::new("accuracy").unwrap(),
            CriterionId::new("fluency").unwrap(),
        ];
        let resolved = blueprint.criteria_for(&ids);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id().as_str(), "accuracy");
        assert_eq!(resolved[1].id().as_str(), "fluency");
    }
}
