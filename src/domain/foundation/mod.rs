//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the FluentPath assessment domain.

mod cefr;
mod errors;
mod ids;
mod score;
mod session_status;
mod skill;
mod timestamp;
mod weight;

pub use cefr::CefrLevel;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BlueprintId, CriterionId, QuestionId, SessionId, UserId};
pub use score::Score;
pub use session_status::SessionStatus;
pub use skill::Skill;
pub use timestamp::Timestamp;
pub use weight::{Weight, WEIGHT_SUM_LIMIT, WEIGHT_SUM_TOLERANCE};
