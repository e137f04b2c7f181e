//! Storage layer: the repository capability, store configuration, and the
//! stores built on it.

pub mod board;
pub mod config;
pub mod job_store;
pub mod keys;
pub mod repository;
pub mod settings_store;
pub mod submissions;
pub mod users;

pub use board::JobBoard;
pub use config::{StorageBackend, StoreConfig};
pub use job_store::{parse_collection, DeleteError, JobRecordStore, ParseError, PostJobError};
pub use repository::{FileRepository, InMemoryRepository, Repository, RepositoryError};
pub use settings_store::{SettingsStore, Theme};
pub use submissions::SubmissionStore;
pub use users::UserDirectory;
