//! Assessment question value objects.
//!
//! Questions are a closed tagged union: multiple-choice, listening and
//! speaking. Construction validates every invariant up front and fails with
//! a field-naming error; nothing is silently coerced.
//!
//! # Invariants
//!
//! - weight is within [0.1, 100]
//! - choice questions carry at least two options, with unique ids, and a
//!   non-empty `correct_option_ids` subset of those options
//! - speaking questions reference at least one rubric criterion
//! - tags are de-duplicated case-insensitively, first spelling wins
//!
//! `correct_option_ids` is internal grading data; DTO mappers at the API
//! boundary must never expose it to consumers.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{
    CefrLevel, CriterionId, QuestionId, Skill, ValidationError, Weight, WEIGHT_SUM_LIMIT,
    WEIGHT_SUM_TOLERANCE,
};

/// One selectable option of a choice-based question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

impl AnswerOption {
    /// Creates an option, rejecting blank id or text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let text = text.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("option_id"));
        }
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("option_text"));
        }
        Ok(Self { id, text })
    }
}

/// Fields shared by every question variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCore {
    id: QuestionId,
    title: String,
    skill: Skill,
    level: CefrLevel,
    weight: Weight,
    tags: Vec<String>,
}

impl QuestionCore {
    fn new(
        id: QuestionId,
        title: String,
        skill: Skill,
        level: CefrLevel,
        weight: f64,
        tags: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let weight = Weight::try_new(weight)?;
        Ok(Self {
            id,
            title,
            skill,
            level,
            weight,
            tags: dedupe_tags(tags),
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn skill(&self) -> Skill {
        self.skill
    }

    pub fn level(&self) -> CefrLevel {
        self.level
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// De-duplicates tags case-insensitively, keeping the first spelling.
fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| !tag.trim().is_empty())
        .filter(|tag| seen.insert(tag.trim().to_ascii_lowercase()))
        .collect()
}

/// An assessment question.
///
/// Closed union; downstream code matches exhaustively so an unhandled
/// variant is a compile error, never a silent default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentQuestion {
    MultipleChoice {
        core: QuestionCore,
        options: Vec<AnswerOption>,
        correct_option_ids: Vec<String>,
    },
    Listening {
        core: QuestionCore,
        audio_ref: String,
        options: Vec<AnswerOption>,
        correct_option_ids: Vec<String>,
    },
    Speaking {
        core: QuestionCore,
        prompt: String,
        criterion_ids: Vec<CriterionId>,
    },
}

impl AssessmentQuestion {
    /// Creates a multiple-choice question.
    #[allow(clippy::too_many_arguments)]
    pub fn multiple_choice(
        id: QuestionId,
        title: impl Into<String>,
        skill: Skill,
        level: CefrLevel,
        weight: f64,
        tags: Vec<String>,
        options: Vec<AnswerOption>,
        correct_option_ids: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let core = QuestionCore::new(id, title.into(), skill, level, weight, tags)?;
        validate_choice_payload(&options, &correct_option_ids)?;
        Ok(AssessmentQuestion::MultipleChoice {
            core,
            options,
            correct_option_ids,
        })
    }

    /// Creates a listening comprehension question. Skill is always listening.
    #[allow(clippy::too_many_arguments)]
    pub fn listening(
        id: QuestionId,
        title: impl Into<String>,
        level: CefrLevel,
        weight: f64,
        tags: Vec<String>,
        audio_ref: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_option_ids: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let audio_ref = audio_ref.into();
        if audio_ref.trim().is_empty() {
            return Err(ValidationError::empty_field("audio_ref"));
        }
        let core = QuestionCore::new(id, title.into(), Skill::Listening, level, weight, tags)?;
        validate_choice_payload(&options, &correct_option_ids)?;
        Ok(AssessmentQuestion::Listening {
            core,
            audio_ref,
            options,
            correct_option_ids,
        })
    }

    /// Creates a speaking question. Skill is always speaking.
    pub fn speaking(
        id: QuestionId,
        title: impl Into<String>,
        level: CefrLevel,
        weight: f64,
        tags: Vec<String>,
        prompt: impl Into<String>,
        criterion_ids: Vec<CriterionId>,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        if criterion_ids.is_empty() {
            return Err(ValidationError::empty_field("criterion_ids"));
        }
        let mut seen = HashSet::new();
        for criterion_id in &criterion_ids {
            if !seen.insert(criterion_id.clone()) {
                return Err(ValidationError::duplicate(
                    "criterion_ids",
                    criterion_id.as_str(),
                ));
            }
        }
        let core = QuestionCore::new(id, title.into(), Skill::Speaking, level, weight, tags)?;
        Ok(AssessmentQuestion::Speaking {
            core,
            prompt,
            criterion_ids,
        })
    }

    /// Shared fields of any variant.
    pub fn core(&self) -> &QuestionCore {
        match self {
            AssessmentQuestion::MultipleChoice { core, .. }
            | AssessmentQuestion::Listening { core, .. }
            | AssessmentQuestion::Speaking { core, .. } => core,
        }
    }

    pub fn id(&self) -> &QuestionId {
        self.core().id()
    }

    pub fn skill(&self) -> Skill {
        self.core().skill()
    }

    pub fn weight(&self) -> Weight {
        self.core().weight()
    }

    /// Correct option ids for choice variants, `None` for speaking.
    pub fn correct_option_ids(&self) -> Option<&[String]> {
        match self {
            AssessmentQuestion::MultipleChoice {
                correct_option_ids, ..
            }
            | AssessmentQuestion::Listening {
                correct_option_ids, ..
            } => Some(correct_option_ids),
            AssessmentQuestion::Speaking { .. } => None,
        }
    }

    /// Option ids for choice variants, `None` for speaking.
    pub fn option_ids(&self) -> Option<Vec<&str>> {
        match self {
            AssessmentQuestion::MultipleChoice { options, .. }
            | AssessmentQuestion::Listening { options, .. } => {
                Some(options.iter().map(|o| o.id.as_str()).collect())
            }
            AssessmentQuestion::Speaking { .. } => None,
        }
    }

    /// Rubric criterion ids for speaking questions, `None` otherwise.
    pub fn criterion_ids(&self) -> Option<&[CriterionId]> {
        match self {
            AssessmentQuestion::Speaking { criterion_ids, .. } => Some(criterion_ids),
            _ => None,
        }
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self, AssessmentQuestion::Speaking { .. })
    }
}

fn validate_choice_payload(
    options: &[AnswerOption],
    correct_option_ids: &[String],
) -> Result<(), ValidationError> {
    if options.len() < 2 {
        return Err(ValidationError::invalid_format(
            "options",
            "at least two options are required",
        ));
    }
    let mut option_ids = HashSet::new();
    for option in options {
        if !option_ids.insert(option.id.as_str()) {
            return Err(ValidationError::duplicate("options", &option.id));
        }
    }
    if correct_option_ids.is_empty() {
        return Err(ValidationError::empty_field("correct_option_ids"));
    }
    let mut seen_correct = HashSet::new();
    for id in correct_option_ids {
        if !option_ids.contains(id.as_str()) {
            return Err(ValidationError::invalid_format(
                "correct_option_ids",
                format!("'{}' is not one of the question's options", id),
            ));
        }
        if !seen_correct.insert(id.as_str()) {
            return Err(ValidationError::duplicate("correct_option_ids", id));
        }
    }
    Ok(())
}

/// A validated set of questions making up one assessment.
///
/// # Invariants
///
/// - question ids are unique within the set
/// - the weights sum to at most 100 (within a small floating tolerance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<AssessmentQuestion>);

impl QuestionSet {
    /// Validates set-wide invariants and builds the set.
    pub fn new(questions: Vec<AssessmentQuestion>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id().clone()) {
                return Err(ValidationError::duplicate("questions", question.id().as_str()));
            }
        }
        let total: f64 = questions.iter().map(|q| q.weight().value()).sum();
        if total > WEIGHT_SUM_LIMIT + WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::out_of_range(
                "total_weight",
                0.0,
                WEIGHT_SUM_LIMIT,
                total,
            ));
        }
        Ok(Self(questions))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssessmentQuestion> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all question weights.
    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(|q| q.weight().value()).sum()
    }

    /// Builds an id-to-question lookup map.
    ///
    /// Build this once per use-case call instead of scanning the list per
    /// lookup.
    pub fn by_id(&self) -> HashMap<&QuestionId, &AssessmentQuestion> {
        self.0.iter().map(|q| (q.id(), q)).collect()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&AssessmentQuestion> {
        self.0.iter().find(|q| q.id() == id)
    }
}
