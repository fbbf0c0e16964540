//! In-memory learner profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{LearnerProfile, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    profiles: RwLock<HashMap<UserId, LearnerProfile>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: LearnerProfile) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo
                .profiles
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.insert(profile.id.clone(), profile);
        }
        repo
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<LearnerProfile>, DomainError> {
        let guard = self.profiles.read().map_err(|_| {
            DomainError::new(ErrorCode::RepositoryError, "Profile store lock poisoned")
        })?;
        Ok(guard.get(id).cloned())
    }

    async fn save(&self, profile: &LearnerProfile) -> Result<(), DomainError> {
        let mut guard = self.profiles.write().map_err(|_| {
            DomainError::new(ErrorCode::RepositoryError, "Profile store lock poisoned")
        })?;
        guard.insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}
