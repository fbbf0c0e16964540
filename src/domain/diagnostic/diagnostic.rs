//! Assessment diagnostic assembly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{Skill, Timestamp, ValidationError};

use super::profile::{CefrDiagnosticProfile, Confidence};
use super::scoring::{ConfidencePolicy, ScoreBreakdown, SkillBreakdown};

/// Score at or above which a skill earns a strength note.
const STRENGTH_THRESHOLD: f64 = 75.0;

/// Scores below this earn a priority improvement note; [45, 60) earns a
/// moderate one.
const PRIORITY_IMPROVEMENT_THRESHOLD: f64 = 45.0;

/// Upper bound (exclusive) of the moderate improvement band.
const IMPROVEMENT_CEILING: f64 = 60.0;

/// Diagnostic for one assessed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDiagnostic {
    pub skill: Skill,
    pub profile: CefrDiagnosticProfile,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl SkillDiagnostic {
    /// Builds a skill diagnostic from its breakdown, inferring strength and
    /// improvement notes from the score.
    pub fn from_breakdown(breakdown: &SkillBreakdown, confidence: Confidence) -> Self {
        let mut strengths = Vec::new();
        let mut improvements = Vec::new();
        let score = breakdown.score;
        let label = breakdown.skill.label();

        if score >= STRENGTH_THRESHOLD {
            strengths.push(format!("{} is a clear strength at {:.0} points", label, score));
        } else if score < PRIORITY_IMPROVEMENT_THRESHOLD {
            improvements.push(format!(
                "{} needs priority attention ({:.0} points)",
                label, score
            ));
        } else if (PRIORITY_IMPROVEMENT_THRESHOLD..IMPROVEMENT_CEILING).contains(&score) {
            improvements.push(format!(
                "{} would benefit from focused practice ({:.0} points)",
                label, score
            ));
        }

        let rationale = vec![format!(
            "Weighted {} score {:.2} over {:.1}% of assessment weight",
            label.to_ascii_lowercase(),
            score,
            breakdown.weight_total
        )];

        Self {
            skill: breakdown.skill,
            profile: CefrDiagnosticProfile::from_score(score, confidence, rationale),
            strengths,
            improvements,
        }
    }
}

/// The computed outcome of an assessment.
///
/// # Invariants
///
/// - `skills` is non-empty and each skill appears once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDiagnostic {
    pub overall: CefrDiagnosticProfile,
    pub skills: Vec<SkillDiagnostic>,
    pub recommendations: Vec<String>,
    pub notes: Option<String>,
    pub generated_at: Timestamp,
}

impl AssessmentDiagnostic {
    /// Validates and builds a diagnostic.
    pub fn new(
        overall: CefrDiagnosticProfile,
        skills: Vec<SkillDiagnostic>,
        recommendations: Vec<String>,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if skills.is_empty() {
            return Err(ValidationError::empty_field("skills"));
        }
        let mut seen = HashSet::new();
        for diagnostic in &skills {
            if !seen.insert(diagnostic.skill) {
                return Err(ValidationError::duplicate("skills", diagnostic.skill.label()));
            }
        }
        Ok(Self {
            overall,
            skills,
            recommendations,
            notes,
            generated_at: Timestamp::now(),
        })
    }
}

/// Builds the full diagnostic for a score breakdown.
///
/// Fails when the breakdown covers no skills (an empty assessment).
pub fn build_diagnostic(
    breakdown: &ScoreBreakdown,
    policy: &ConfidencePolicy,
) -> Result<AssessmentDiagnostic, ValidationError> {
    let confidence = policy.infer(breakdown);

    let rationale = vec![
        format!(
            "Overall weighted score {:.2} across {} evaluated responses",
            breakdown.overall_score, breakdown.evaluated_responses
        ),
        format!(
            "Answers covered {:.0}% of the assessment weight",
            breakdown.coverage() * 100.0
        ),
    ];
    let overall =
        CefrDiagnosticProfile::from_score(breakdown.overall_score, confidence, rationale);

    let skills: Vec<SkillDiagnostic> = breakdown
        .skills
        .iter()
        .map(|skill| SkillDiagnostic::from_breakdown(skill, confidence))
        .collect();

    let mut recommendations = Vec::new();
    if let Some(weakest) = breakdown
        .skills
        .iter()
        .min_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
    {
        if weakest.score < STRENGTH_THRESHOLD {
            recommendations.push(format!(
                "Prioritize {} practice to lift your weakest skill",
                weakest.skill.label().to_ascii_lowercase()
            ));
        }
    }
    if confidence == Confidence::Low {
        recommendations
            .push("Complete more of the assessment for a firmer reading".to_string());
    }

    AssessmentDiagnostic::new(overall, skills, recommendations, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CefrLevel;

    fn skill_breakdown(skill: Skill, score: f64) -> SkillBreakdown {
        SkillBreakdown {
            skill,
            score,
            weight_total: 50.0,
            weight_answered: 50.0,
        }
    }

    fn breakdown(skills: Vec<SkillBreakdown>, overall: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            overall_score: overall,
            total_weight: 100.0,
            answered_weight: 100.0,
            evaluated_responses: 2,
            skills,
        }
    }

    #[test]
    fn strong_skill_gets_strength_note() {
        let diag =
            SkillDiagnostic::from_breakdown(&skill_breakdown(Skill::Grammar, 80.0), Confidence::High);
        assert_eq!(diag.strengths.len(), 1);
        assert!(diag.improvements.is_empty());
    }

    #[test]
    fn mid_band_skill_gets_moderate_improvement_note() {
        let diag = SkillDiagnostic::from_breakdown(
            &skill_breakdown(Skill::Listening, 50.0),
            Confidence::High,
        );
        assert!(diag.strengths.is_empty());
        assert_eq!(diag.improvements.len(), 1);
        assert!(diag.improvements[0].contains("focused practice"));
    }

    #[test]
    fn weak_skill_gets_priority_note() {
        let diag = SkillDiagnostic::from_breakdown(
            &skill_breakdown(Skill::Speaking, 30.0),
            Confidence::Medium,
        );
        assert_eq!(diag.improvements.len(), 1);
        assert!(diag.improvements[0].contains("priority"));
    }

    #[test]
    fn upper_middle_band_gets_no_notes() {
        let diag = SkillDiagnostic::from_breakdown(
            &skill_breakdown(Skill::Reading, 65.0),
            Confidence::High,
        );
        assert!(diag.strengths.is_empty());
        assert!(diag.improvements.is_empty());
    }

    #[test]
    fn diagnostic_rejects_empty_skill_list() {
        let overall = CefrDiagnosticProfile::from_score(50.0, Confidence::Low, vec![]);
        let result = AssessmentDiagnostic::new(overall, vec![], vec![], None);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn diagnostic_rejects_duplicate_skills() {
        let overall = CefrDiagnosticProfile::from_score(50.0, Confidence::Low, vec![]);
        let skill = SkillDiagnostic::from_breakdown(
            &skill_breakdown(Skill::Grammar, 50.0),
            Confidence::Low,
        );
        let result =
            AssessmentDiagnostic::new(overall, vec![skill.clone(), skill], vec![], None);
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn build_diagnostic_assembles_overall_and_skills() {
        let breakdown = breakdown(
            vec![
                skill_breakdown(Skill::Grammar, 100.0),
                skill_breakdown(Skill::Speaking, 60.0),
            ],
            84.0,
        );
        let diagnostic = build_diagnostic(&breakdown, &ConfidencePolicy::default()).unwrap();
        assert_eq!(diagnostic.overall.level, CefrLevel::C1);
        assert_eq!(diagnostic.overall.score, 84.0);
        assert_eq!(diagnostic.overall.confidence, Confidence::High);
        assert_eq!(diagnostic.skills.len(), 2);
        // speaking at 60 is the weakest and below strength threshold
        assert!(diagnostic.recommendations[0].contains("speaking"));
    }

    #[test]
    fn build_diagnostic_fails_without_skills() {
        let breakdown = breakdown(vec![], 0.0);
        assert!(build_diagnostic(&breakdown, &ConfidencePolicy::default()).is_err());
    }

    #[test]
    fn low_confidence_adds_coverage_recommendation() {
        let mut b = breakdown(vec![skill_breakdown(Skill::Grammar, 90.0)], 90.0);
        b.answered_weight = 20.0;
        let diagnostic = build_diagnostic(&b, &ConfidencePolicy::default()).unwrap();
        assert_eq!(diagnostic.overall.confidence, Confidence::Low);
        assert!(diagnostic
            .recommendations
            .iter()
            .any(|r| r.contains("firmer reading")));
    }
}
