//! Persistent key/value capability that every store is built on.
//!
//! Values are opaque text (JSON for everything but the theme). A backend may
//! enforce a byte quota; a write that would exceed it fails and leaves the
//! previous value in place.

mod file;
mod in_memory;

use std::sync::Arc;

pub use file::FileRepository;
pub use in_memory::InMemoryRepository;

/// Key/value storage abstraction.
pub trait Repository: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

impl<S> Repository for Arc<S>
where
    S: Repository + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        (**self).remove(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl RepositoryError {
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// Bytes a single entry counts against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Fail if replacing `key` with `value` would push `used` (which excludes
/// `key`'s current entry) over `quota`.
pub(crate) fn check_quota(
    quota: Option<usize>,
    used: usize,
    key: &str,
    value: &str,
) -> Result<(), RepositoryError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let needed = used + entry_size(key, value);
    if needed > quota {
        return Err(RepositoryError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

/// Serialize `value` as JSON and store it under `key`.
pub(crate) fn write_json<R, T>(repo: &R, key: &str, value: &T) -> Result<(), RepositoryError>
where
    R: Repository + ?Sized,
    T: serde::Serialize + ?Sized,
{
    let text = serde_json::to_string(value).map_err(std::io::Error::from)?;
    repo.set(key, &text)
}

/// Read `key` as JSON. Missing, blank and unparsable values are all `None`;
/// only storage failures are errors.
pub(crate) fn read_json<R, T>(repo: &R, key: &str) -> Result<Option<T>, RepositoryError>
where
    R: Repository + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let Some(raw) = repo.get(key)?.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring unparsable stored value");
            Ok(None)
        }
    }
}

/// Read `key` as a JSON list, keeping the entries that decode as `T`.
/// Anything other than a list reads as empty.
pub(crate) fn read_list<R, T>(repo: &R, key: &str) -> Result<Vec<T>, RepositoryError>
where
    R: Repository + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let Some(serde_json::Value::Array(entries)) = read_json(repo, key)? else {
        return Ok(Vec::new());
    };
    let total = entries.len();
    let kept: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if kept.len() < total {
        tracing::debug!(key, skipped = total - kept.len(), "skipped malformed list entries");
    }
    Ok(kept)
}
