//! In-memory blueprint catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::assessment::AssessmentBlueprint;
use crate::domain::foundation::{BlueprintId, DomainError, ErrorCode};
use crate::ports::BlueprintProvider;

/// Blueprint catalog backed by a map, for tests and local development.
#[derive(Default)]
pub struct InMemoryBlueprintProvider {
    blueprints: RwLock<HashMap<BlueprintId, AssessmentBlueprint>>,
}

impl InMemoryBlueprintProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blueprint(blueprint: AssessmentBlueprint) -> Self {
        let provider = Self::new();
        provider.insert(blueprint);
        provider
    }

    pub fn insert(&self, blueprint: AssessmentBlueprint) {
        let mut guard = self
            .blueprints
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(blueprint.id().clone(), blueprint);
    }
}

#[async_trait]
impl BlueprintProvider for InMemoryBlueprintProvider {
    async fn find_by_id(
        &self,
        id: &BlueprintId,
    ) -> Result<Option<AssessmentBlueprint>, DomainError> {
        let guard = self.blueprints.read().map_err(|_| {
            DomainError::new(ErrorCode::RepositoryError, "Blueprint store lock poisoned")
        })?;
        Ok(guard.get(id).cloned())
    }
}
