//! # In-Memory Preference Repository
//!
//! In-memory implementation of [`PreferenceRepository`] for testing.

use crate::domain::entities::PreferenceModel;
use crate::domain::value_objects::AnalystId;
use crate::infrastructure::persistence::traits::{PreferenceRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`PreferenceRepository`], keyed by analyst.
#[derive(Debug, Clone)]
pub struct InMemoryPreferenceRepository {
    storage: Arc<RwLock<HashMap<AnalystId, PreferenceModel>>>,
}

impl InMemoryPreferenceRepository {
    /// Creates a new empty in-memory preference repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored models.
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

impl Default for InMemoryPreferenceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn get(&self, analyst: &AnalystId) -> RepositoryResult<Option<PreferenceModel>> {
        let storage = self.storage.read().await;
        Ok(storage.get(analyst).cloned())
    }

    async fn replace(&self, model: &PreferenceModel) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(model.analyst_id(), model.clone());
        Ok(())
    }

    async fn insert_if_absent(&self, model: &PreferenceModel) -> RepositoryResult<PreferenceModel> {
        let mut storage = self.storage.write().await;
        Ok(storage
            .entry(model.analyst_id())
            .or_insert_with(|| model.clone())
            .clone())
    }
}
