//! Rubric criterion value objects for evaluating open-ended answers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{CriterionId, Skill, ValidationError, Weight};

/// Performance level of one rubric descriptor band, ordered ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Emerging,
    Developing,
    Proficient,
    Mastery,
}

impl PerformanceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Emerging => "Emerging",
            PerformanceLevel::Developing => "Developing",
            PerformanceLevel::Proficient => "Proficient",
            PerformanceLevel::Mastery => "Mastery",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One band of a rubric: a performance level tied to a score range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDescriptor {
    level: PerformanceLevel,
    min_score: f64,
    max_score: f64,
    text: String,
    evidence: Vec<String>,
}

impl RubricDescriptor {
    /// Creates a descriptor band, validating the score range and text.
    pub fn new(
        level: PerformanceLevel,
        min_score: f64,
        max_score: f64,
        text: impl Into<String>,
        evidence: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("descriptor_text"));
        }
        if !(0.0..=100.0).contains(&min_score) {
            return Err(ValidationError::out_of_range("min_score", 0.0, 100.0, min_score));
        }
        if !(0.0..=100.0).contains(&max_score) {
            return Err(ValidationError::out_of_range("max_score", 0.0, 100.0, max_score));
        }
        if min_score > max_score {
            return Err(ValidationError::invalid_format(
                "descriptor_range",
                format!("min_score {} exceeds max_score {}", min_score, max_score),
            ));
        }
        Ok(Self {
            level,
            min_score,
            max_score,
            text,
            evidence,
        })
    }

    pub fn level(&self) -> PerformanceLevel {
        self.level
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    /// Returns true if the score falls inside this band.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

/// A named, weighted evaluation dimension with ordered descriptor bands.
///
/// # Invariants
///
/// - each performance level appears at most once
/// - descriptor ranges lie within 0-100 and never overlap
/// - descriptors are stored sorted by minimum score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentCriterion {
    id: CriterionId,
    title: String,
    skill: Skill,
    focus: String,
    weight: Weight,
    descriptors: Vec<RubricDescriptor>,
}

impl AssessmentCriterion {
    /// Validates and builds a criterion, sorting descriptors by minimum
    /// score for downstream consumers.
    pub fn new(
        id: CriterionId,
        title: impl Into<String>,
        skill: Skill,
        focus: impl Into<String>,
        weight: f64,
        mut descriptors: Vec<RubricDescriptor>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let focus = focus.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if focus.trim().is_empty() {
            return Err(ValidationError::empty_field("focus"));
        }
        let weight = Weight::try_new(weight)?;
        if descriptors.is_empty() {
            return Err(ValidationError::empty_field("descriptors"));
        }

        let mut levels = HashSet::new();
        for descriptor in &descriptors {
            if !levels.insert(descriptor.level) {
                return Err(ValidationError::duplicate(
                    "descriptors",
                    descriptor.level.label(),
                ));
            }
        }

        descriptors.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));
        for pair in descriptors.windows(2) {
            if pair[1].min_score <= pair[0].max_score {
                return Err(ValidationError::invalid_format(
                    "descriptors",
                    format!(
                        "bands '{}' and '{}' have overlapping score ranges",
                        pair[0].level, pair[1].level
                    ),
                ));
            }
        }

        Ok(Self {
            id,
            title,
            skill,
            focus,
            weight,
            descriptors,
        })
    }

    pub fn id(&self) -> &CriterionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn skill(&self) -> Skill {
        self.skill
    }

    pub fn focus(&self) -> &str {
        &self.focus
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Descriptor bands, sorted ascending by minimum score.
    pub fn descriptors(&self) -> &[RubricDescriptor] {
        &self.descriptors
    }

    /// Finds the band containing the given score, if any.
    pub fn band_for(&self, score: f64) -> Option<&RubricDescriptor> {
        self.descriptors.iter().find(|d| d.contains(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid() -> CriterionId {
        CriterionId::new("fluency").unwrap()
    }

    fn band(
        level: PerformanceLevel,
        min: f64,
        max: f64,
    ) -> RubricDescriptor {
        RubricDescriptor::new(level, min, max, format!("{} band", level), vec![]).unwrap()
    }

    fn full_bands() -> Vec<RubricDescriptor> {
        vec![
            band(PerformanceLevel::Emerging, 0.0, 39.0),
            band(PerformanceLevel::Developing, 40.0, 64.0),
            band(PerformanceLevel::Proficient, 65.0, 84.0),
            band(PerformanceLevel::Mastery, 85.0, 100.0),
        ]
    }

    #[test]
    fn builds_with_valid_bands() {
        let criterion = AssessmentCriterion::new(
            cid(),
            "Fluency",
            Skill::Speaking,
            "Pace and flow of speech",
            25.0,
            full_bands(),
        )
        .unwrap();
        assert_eq!(criterion.descriptors().len(), 4);
        assert_eq!(criterion.weight().value(), 25.0);
    }

    #[test]
    fn sorts_descriptors_by_min_score() {
        let mut bands = full_bands();
        bands.reverse();
        let criterion = AssessmentCriterion::new(
            cid(),
            "Fluency",
            Skill::Speaking,
            "Pace",
            25.0,
            bands,
        )
        .unwrap();
        let mins: Vec<f64> = criterion.descriptors().iter().map(|d| d.min_score).collect();
        assert_eq!(mins, vec![0.0, 40.0, 65.0, 85.0]);
    }

    #[test]
    fn rejects_duplicate_performance_levels() {
        let bands = vec![
            band(PerformanceLevel::Emerging, 0.0, 39.0),
            band(PerformanceLevel::Emerging, 40.0, 64.0),
        ];
        let result =
            AssessmentCriterion::new(cid(), "Fluency", Skill::Speaking, "Pace", 25.0, bands);
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let bands = vec![
            band(PerformanceLevel::Emerging, 0.0, 50.0),
            band(PerformanceLevel::Developing, 40.0, 64.0),
        ];
        let result =
            AssessmentCriterion::new(cid(), "Fluency", Skill::Speaking, "Pace", 25.0, bands);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn rejects_empty_descriptor_set() {
        let result =
            AssessmentCriterion::new(cid(), "Fluency", Skill::Speaking, "Pace", 25.0, vec![]);
        assert!(matches!(result, Err(ValidationError::EmptyField { field }) if field == "descriptors"));
    }

    #[test]
    fn descriptor_rejects_inverted_range() {
        let result = RubricDescriptor::new(PerformanceLevel::Emerging, 50.0, 40.0, "text", vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn descriptor_rejects_out_of_scale_range() {
        assert!(RubricDescriptor::new(PerformanceLevel::Mastery, 85.0, 101.0, "t", vec![]).is_err());
        assert!(RubricDescriptor::new(PerformanceLevel::Emerging, -1.0, 40.0, "t", vec![]).is_err());
    }

    #[test]
    fn descriptor_rejects_non_finite_scores() {
        assert!(RubricDescriptor::new(PerformanceLevel::Emerging, f64::NAN, 40.0, "t", vec![])
            .is_err());
        assert!(RubricDescriptor::new(PerformanceLevel::Emerging, 0.0, f64::NAN, "t", vec![])
            .is_err());
        assert!(RubricDescriptor::new(
            PerformanceLevel::Emerging,
            0.0,
            f64::INFINITY,
            "t",
            vec![]
        )
        .is_err());
    }

    #[test]
    fn band_for_finds_containing_band() {
        let criterion = AssessmentCriterion::new(
            cid(),
            "Fluency",
            Skill::Speaking,
            "Pace",
            25.0,
            full_bands(),
        )
        .unwrap();
        assert_eq!(
            criterion.band_for(70.0).unwrap().level,
            PerformanceLevel::Proficient
        );
        // 39.5 falls in the gap between bands
        assert!(criterion.band_for(39.5).is_none());
    }
}
