//! CEFR diagnostic profile value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::CefrLevel;

/// How much the diagnostic should be trusted, given answer coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A calibrated CEFR reading of a numeric score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CefrDiagnosticProfile {
    pub level: CefrLevel,
    /// The score the level was derived from, rounded to the nearest integer.
    pub score: f64,
    pub confidence: Confidence,
    pub rationale: Vec<String>,
}

impl CefrDiagnosticProfile {
    /// Derives the level from the score via the fixed CEFR bands.
    pub fn from_score(score: f64, confidence: Confidence, rationale: Vec<String>) -> Self {
        let rounded = score.round();
        Self {
            level: CefrLevel::from_score(score),
            score: rounded,
            confidence,
            rationale,
        }
    }
}
