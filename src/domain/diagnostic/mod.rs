//! Diagnostic module - pure scoring and CEFR profiling.
//!
//! Everything here is synchronous, deterministic computation: the weighted
//! score breakdown, the coverage-based confidence policy, and the CEFR
//! diagnostic assembled from them.

mod diagnostic;
mod profile;
mod scoring;

pub use diagnostic::{build_diagnostic, AssessmentDiagnostic, SkillDiagnostic};
pub use profile::{CefrDiagnosticProfile, Confidence};
pub use scoring::{compute_score_breakdown, ConfidencePolicy, ScoreBreakdown, SkillBreakdown};
