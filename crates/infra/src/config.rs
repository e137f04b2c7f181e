//! Store configuration, read from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::repository::{FileRepository, InMemoryRepository, Repository};

pub const ENV_STORAGE: &str = "AFGJOBS_STORAGE";
pub const ENV_DATA_DIR: &str = "AFGJOBS_DATA_DIR";
pub const ENV_QUOTA: &str = "AFGJOBS_STORAGE_QUOTA_BYTES";

/// Typical browser local-storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    /// `None` disables the quota (`AFGJOBS_STORAGE_QUOTA_BYTES=0`).
    pub quota_bytes: Option<usize>,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup(ENV_STORAGE).as_deref().map(str::trim) {
            None | Some("") | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => anyhow::bail!("{ENV_STORAGE} must be `memory` or `file`, got `{other}`"),
        };

        let data_dir = match lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let quota_bytes = match lookup(ENV_QUOTA).filter(|q| !q.trim().is_empty()) {
            Some(raw) => {
                let bytes: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{ENV_QUOTA} must be a byte count, got `{raw}`"))?;
                (bytes > 0).then_some(bytes)
            }
            None => Some(DEFAULT_QUOTA_BYTES),
        };

        Ok(Self {
            backend,
            data_dir,
            quota_bytes,
        })
    }

    /// Open the configured backend.
    pub fn open_repository(&self) -> anyhow::Result<Arc<dyn Repository>> {
        let repo: Arc<dyn Repository> = match self.backend {
            StorageBackend::Memory => Arc::new(match self.quota_bytes {
                Some(quota) => InMemoryRepository::with_quota(quota),
                None => InMemoryRepository::new(),
            }),
            StorageBackend::File => Arc::new(
                FileRepository::open(&self.data_dir, self.quota_bytes)
                    .with_context(|| format!("failed to open data directory at {:?}", self.data_dir))?,
            ),
        };
        tracing::info!(backend = ?self.backend, quota = ?self.quota_bytes, "opened job board storage");
        Ok(repo)
    }
}

/// `{app_data_dir}/afgjobs`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("afgjobs");
    Ok(dir)
}
