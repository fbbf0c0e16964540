//! Skill vocabulary for assessment content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Language skill assessed by a question or rubric criterion.
///
/// Closed vocabulary; adding a skill is a deliberate domain change, so no
/// catch-all variant exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Listening,
    Reading,
    Grammar,
    Vocabulary,
    Speaking,
    Writing,
}

impl Skill {
    /// All skills, in presentation order.
    pub const ALL: [Skill; 6] = [
        Skill::Listening,
        Skill::Reading,
        Skill::Grammar,
        Skill::Vocabulary,
        Skill::Speaking,
        Skill::Writing,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Skill::Listening => "Listening",
            Skill::Reading => "Reading",
            Skill::Grammar => "Grammar",
            Skill::Vocabulary => "Vocabulary",
            Skill::Speaking => "Speaking",
            Skill::Writing => "Writing",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Skill {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listening" => Ok(Skill::Listening),
            "reading" => Ok(Skill::Reading),
            "grammar" => Ok(Skill::Grammar),
            "vocabulary" => Ok(Skill::Vocabulary),
            "speaking" => Ok(Skill::Speaking),
            "writing" => Ok(Skill::Writing),
            other => Err(ValidationError::invalid_format(
                "skill",
                format!("'{}' is not a known skill", other),
            )),
        }
    }
}
