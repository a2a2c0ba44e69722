//! # In-Memory Analyst Repository
//!
//! In-memory implementation of [`AnalystRepository`] for testing.

use crate::domain::entities::Analyst;
use crate::domain::value_objects::{AnalystId, EmailAddress};
use crate::infrastructure::persistence::traits::{
    AnalystRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`AnalystRepository`].
///
/// Email uniqueness is enforced under the write lock, so two concurrent
/// registrations with the same address cannot both succeed.
#[derive(Debug, Clone)]
pub struct InMemoryAnalystRepository {
    storage: Arc<RwLock<HashMap<AnalystId, Analyst>>>,
}

impl InMemoryAnalystRepository {
    /// Creates a new empty in-memory analyst repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of analysts in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAnalystRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalystRepository for InMemoryAnalystRepository {
    async fn insert(&self, analyst: &Analyst) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.values().any(|a| a.email() == analyst.email()) {
            return Err(RepositoryError::duplicate(
                "Analyst",
                analyst.email().as_str(),
            ));
        }
        storage.insert(analyst.id(), analyst.clone());
        Ok(())
    }

    async fn get(&self, id: &AnalystId) -> RepositoryResult<Option<Analyst>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Analyst>> {
        let storage = self.storage.read().await;
        Ok(storage.values().find(|a| a.email() == email).cloned())
    }
}
