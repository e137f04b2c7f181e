use std::collections::HashMap;
use std::sync::RwLock;

use super::{check_quota, entry_size, Repository, RepositoryError};

/// In-memory repository for tests/dev, with an optional byte quota.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Total bytes currently counted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|map| map.iter().map(|(k, v)| entry_size(k, v)).sum())
            .unwrap_or(0)
    }
}

impl Repository for InMemoryRepository {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let map = self.entries.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut map = self.entries.write().map_err(|_| RepositoryError::Poisoned)?;
        let used: usize = map
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum();
        check_quota(self.quota, used, key, value)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut map = self.entries.write().map_err(|_| RepositoryError::Poisoned)?;
        map.remove(key);
        Ok(())
    }
}
