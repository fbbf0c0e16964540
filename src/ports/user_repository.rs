//! Learner profile persistence port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CefrLevel, DomainError, Timestamp, UserId};

/// The slice of a learner's profile the assessment flow touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub id: UserId,
    pub display_name: String,
    pub proficiency_level: Option<CefrLevel>,
    pub updated_at: Timestamp,
}

/// Read and write access to learner profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<LearnerProfile>, DomainError>;

    async fn save(&self, profile: &LearnerProfile) -> Result<(), DomainError>;
}
