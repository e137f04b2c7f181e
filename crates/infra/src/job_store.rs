//! The canonical, newest-first job collection.

use serde_json::Value;

use afgjobs_auth::{require_owner, Identity};
use afgjobs_core::{Clock, DomainError, Entity, JobId};
use afgjobs_jobs::{default_jobs, JobRecord, NewJob};

use crate::keys;
use crate::repository::{write_json, Repository, RepositoryError};

/// Why a stored collection could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("stored value is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("stored value is not a list")]
    NotAList,
    #[error("none of the {skipped} stored entries is a job record")]
    NoUsableEntries { skipped: usize },
}

/// Decode a stored job collection, keeping the entries that are job records.
///
/// Entries that fail to decode are skipped with a warning naming their
/// index. They are not carried into the next write of the collection. A
/// non-empty list with no usable entry is an error; an empty list is not.
pub fn parse_collection(raw: &str) -> Result<Vec<JobRecord>, ParseError> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).map_err(ParseError::Json)? else {
        return Err(ParseError::NotAList);
    };
    let total = items.len();
    let jobs: Vec<JobRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(job) => Some(job),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping stored entry that is not a job record");
                None
            }
        })
        .collect();
    if jobs.is_empty() && total > 0 {
        return Err(ParseError::NoUsableEntries { skipped: total });
    }
    Ok(jobs)
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("job not found")]
    NotFound,
    #[error("only the poster can delete this job")]
    NotOwner,
    #[error("could not save the job list: {0}")]
    Storage(#[from] RepositoryError),
}

impl DeleteError {
    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::NotOwner => "not-owner",
            Self::Storage(_) => "storage",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PostJobError {
    #[error("sign in to post a job")]
    NotSignedIn,
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("could not save the job: {0}")]
    Storage(#[from] RepositoryError),
}

impl PostJobError {
    /// Text shown next to the posting form.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSignedIn => "Please sign in to post a job".to_string(),
            Self::Invalid(err) => err.user_message(),
            Self::Storage(err) if err.is_quota() => {
                "Storage is full. Please use a smaller media file or remove old posts.".to_string()
            }
            Self::Storage(_) => "Could not save the job. Please try again.".to_string(),
        }
    }
}

/// Job collection persisted under [`keys::JOBS`].
///
/// The collection is materialized lazily: the first read migrates the
/// legacy key or installs the sample jobs.
#[derive(Debug, Clone)]
pub struct JobRecordStore<R, C> {
    repo: R,
    clock: C,
}

impl<R, C> JobRecordStore<R, C>
where
    R: Repository,
    C: Clock,
{
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Every job, newest first. Storage failures yield an empty list.
    pub fn load_all(&self) -> Vec<JobRecord> {
        match self.try_load_all() {
            Ok(jobs) => jobs,
            Err(err) => {
                tracing::warn!(error = %err, "could not read job collection");
                Vec::new()
            }
        }
    }

    /// Resolution order: a current collection with usable entries as stored;
    /// an empty current collection is reseeded; with no usable current collection a
    /// non-empty legacy one is copied forward once; otherwise the samples
    /// are installed.
    pub fn try_load_all(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        if let Some(jobs) = self.read_collection(keys::JOBS)? {
            if !jobs.is_empty() {
                return Ok(jobs);
            }
            tracing::debug!("stored job collection is empty; reinstalling samples");
            return self.install_samples();
        }

        if let Some(legacy) = self.read_collection(keys::LEGACY_JOBS)? {
            if !legacy.is_empty() {
                write_json(&self.repo, keys::JOBS, &legacy)?;
                tracing::info!(count = legacy.len(), "migrated legacy job collection");
                return Ok(legacy);
            }
        }

        self.install_samples()
    }

    fn install_samples(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        let jobs = default_jobs();
        write_json(&self.repo, keys::JOBS, &jobs)?;
        tracing::info!(count = jobs.len(), "installed sample jobs");
        Ok(jobs)
    }

    fn read_collection(&self, key: &str) -> Result<Option<Vec<JobRecord>>, RepositoryError> {
        let Some(raw) = self.repo.get(key)?.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };
        match parse_collection(&raw) {
            Ok(jobs) => Ok(Some(jobs)),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unusable job collection");
                Ok(None)
            }
        }
    }

    /// Stamp `input` with an id and `createdAt` and put it at the front.
    ///
    /// The id is the current time in milliseconds, stepped past any id
    /// already in the collection. On failure nothing is written.
    pub fn try_create(&self, input: NewJob) -> Result<JobRecord, RepositoryError> {
        let mut jobs = self.try_load_all()?;
        let now = self.clock.now();

        let mut id = JobId::from_timestamp_millis(now.timestamp_millis());
        while jobs.iter().any(|job| job.id == id) {
            id = id.succ();
        }
        if id.value() != now.timestamp_millis() {
            tracing::debug!(%id, "job id collided with an existing one; stepped forward");
        }

        let record = input.into_record(id, now);
        jobs.insert(0, record.clone());
        write_json(&self.repo, keys::JOBS, &jobs)?;
        tracing::info!(id = %record.id, "job created");
        Ok(record)
    }

    /// [`try_create`](Self::try_create), reporting success only.
    pub fn create(&self, input: NewJob) -> bool {
        match self.try_create(input) {
            Ok(_) => true,
            Err(err) if err.is_quota() => {
                tracing::warn!(error = %err, "storage is full; job not saved");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "job not saved");
                false
            }
        }
    }

    /// The posting flow: sign-in required, draft normalized, attributed to
    /// the poster, validated, then created.
    pub fn post_job(&self, identity: Option<&Identity>, draft: NewJob) -> Result<JobRecord, PostJobError> {
        let identity = identity.ok_or(PostJobError::NotSignedIn)?;
        let draft = draft.normalized().attributed_to(identity);
        draft.validate()?;
        Ok(self.try_create(draft)?)
    }

    /// Remove the job whose id reads as `id`, if `identity` owns it.
    pub fn delete_by_id(&self, id: &str, identity: Option<&Identity>) -> Result<JobRecord, DeleteError> {
        let mut jobs = self.try_load_all()?;
        let index = jobs
            .iter()
            .position(|job| job.has_key(id))
            .ok_or(DeleteError::NotFound)?;

        if let Err(err) = require_owner(&jobs[index], identity) {
            tracing::debug!(id, error = %err, "delete rejected");
            return Err(DeleteError::NotOwner);
        }

        let removed = jobs.remove(index);
        write_json(&self.repo, keys::JOBS, &jobs)?;
        tracing::info!(id = %removed.id, "job deleted");
        Ok(removed)
    }

    pub fn get_by_id(&self, id: &str) -> Option<JobRecord> {
        self.load_all().into_iter().find(|job| job.has_key(id))
    }
}
