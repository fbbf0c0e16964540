//! CEFR proficiency levels and their score bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// CEFR proficiency level (Common European Framework of Reference).
///
/// Ordered from lowest (A1) to highest (C2); the derived `Ord` follows
/// declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// Inclusive score band mapped to a CEFR level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub level: CefrLevel,
    pub min: f64,
    pub max: f64,
}

/// Fixed, ordered score bands used to derive a level from an overall score.
pub const SCORE_BANDS: [ScoreBand; 6] = [
    ScoreBand { level: CefrLevel::A1, min: 0.0, max: 29.0 },
    ScoreBand { level: CefrLevel::A2, min: 30.0, max: 44.0 },
    ScoreBand { level: CefrLevel::B1, min: 45.0, max: 59.0 },
    ScoreBand { level: CefrLevel::B2, min: 60.0, max: 74.0 },
    ScoreBand { level: CefrLevel::C1, min: 75.0, max: 89.0 },
    ScoreBand { level: CefrLevel::C2, min: 90.0, max: 100.0 },
];

impl CefrLevel {
    /// Derives a level from a 0-100 score.
    ///
    /// The score is rounded to the nearest integer and matched against the
    /// first band whose `[min, max]` range contains it. Scores outside every
    /// band fall back to the highest-ordered band.
    pub fn from_score(score: f64) -> Self {
        let rounded = score.round();
        SCORE_BANDS
            .iter()
            .find(|band| rounded >= band.min && rounded <= band.max)
            .map(|band| band.level)
            .unwrap_or(CefrLevel::C2)
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CefrLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(ValidationError::invalid_format(
                "cefr_level",
                format!("'{}' is not a CEFR level", other),
            )),
        }
    }
}
