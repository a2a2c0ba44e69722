//! # In-Memory Company Repository
//!
//! In-memory implementation of [`CompanyRepository`] for testing.

use crate::domain::entities::Company;
use crate::domain::value_objects::{AnalystId, CompanyId, Timestamp};
use crate::infrastructure::persistence::traits::{CompanyRepository, RepositoryResult};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`CompanyRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryCompanyRepository {
    storage: Arc<RwLock<HashMap<CompanyId, Company>>>,
}

impl InMemoryCompanyRepository {
    /// Creates a new empty in-memory company repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of companies in the repository.
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

impl Default for InMemoryCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn insert(&self, company: &Company) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(company.id(), company.clone());
        Ok(())
    }

    async fn get(&self, id: &CompanyId) -> RepositoryResult<Option<Company>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_analyst(&self, analyst: &AnalystId) -> RepositoryResult<Vec<Company>> {
        let storage = self.storage.read().await;
        let mut companies: Vec<Company> = storage
            .values()
            .filter(|c| c.is_owned_by(analyst))
            .cloned()
            .collect();
        companies.sort_by_key(|c| Reverse(c.created_at()));
        Ok(companies)
    }

    async fn find_recent_by_name(
        &self,
        analyst: &AnalystId,
        name: &str,
        since: Timestamp,
    ) -> RepositoryResult<Option<Company>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|c| c.is_owned_by(analyst) && c.name() == name)
            .filter(|c| !c.created_at().is_before(&since))
            .max_by_key(|c| c.created_at())
            .cloned())
    }

    async fn delete_owned(&self, analyst: &AnalystId, id: &CompanyId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        match storage.get(id) {
            Some(company) if company.is_owned_by(analyst) => Ok(storage.remove(id).is_some()),
            _ => Ok(false),
        }
    }
}
