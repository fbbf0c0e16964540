//! Assessment blueprint lookup port.

use async_trait::async_trait;

use crate::domain::assessment::AssessmentBlueprint;
use crate::domain::foundation::{BlueprintId, DomainError};

/// Read access to published assessment blueprints.
#[async_trait]
pub trait BlueprintProvider: Send + Sync {
    /// Fetches a blueprint by id, `Ok(None)` when it does not exist.
    async fn find_by_id(
        &self,
        id: &BlueprintId,
    ) -> Result<Option<AssessmentBlueprint>, DomainError>;
}
