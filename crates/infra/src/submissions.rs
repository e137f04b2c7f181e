//! Persistence for feedback, newsletter sign-ups and job-seeker profiles.
//!
//! Writes append to the list as stored, so entries this build cannot decode
//! are kept; only the readers decode to typed values.

use serde_json::Value;

use afgjobs_community::{
    subscribe, unique_id, Feedback, FeedbackForm, NewsletterEmail, SeekerForm, SeekerProfile,
    SubmissionError, MAX_SEEKER_PROFILES,
};
use afgjobs_core::Clock;

use crate::keys;
use crate::repository::{read_list, write_json, Repository, RepositoryError};

impl From<RepositoryError> for SubmissionError {
    fn from(err: RepositoryError) -> Self {
        tracing::warn!(error = %err, "could not save submission");
        SubmissionError::storage(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionStore<R, C> {
    repo: R,
    clock: C,
}

impl<R, C> SubmissionStore<R, C>
where
    R: Repository,
    C: Clock,
{
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn submit_feedback(&self, form: FeedbackForm) -> Result<Feedback, SubmissionError> {
        let feedback = form.submit(self.clock.now())?;
        let mut entries = self.raw_list(keys::FEEDBACK)?;
        entries.push(encode(&feedback)?);
        self.store(keys::FEEDBACK, &entries)?;
        Ok(feedback)
    }

    /// Subscribe an address. Returns `false` when it was already on the list.
    pub fn subscribe_newsletter(&self, raw_email: &str) -> Result<bool, SubmissionError> {
        let email = NewsletterEmail::parse(raw_email)?;
        let mut entries = self.raw_list(keys::NEWSLETTER)?;
        let mut known: Vec<String> = entries.iter().filter_map(Value::as_str).map(str::to_string).collect();
        if !subscribe(&mut known, &email) {
            return Ok(false);
        }
        entries.push(Value::String(email.to_string()));
        self.store(keys::NEWSLETTER, &entries)?;
        Ok(true)
    }

    /// Prepend a profile, keeping the newest [`MAX_SEEKER_PROFILES`]. The id
    /// is stepped past any id already stored.
    pub fn post_seeker_profile(&self, form: SeekerForm) -> Result<SeekerProfile, SubmissionError> {
        let mut profile = form.submit(self.clock.now())?;
        let mut entries = self.raw_list(keys::SEEKER_POSTS)?;
        profile.id = unique_id(profile.id, |id| {
            entries.iter().any(|entry| entry.get("id").and_then(Value::as_i64) == Some(id))
        });
        entries.insert(0, encode(&profile)?);
        entries.truncate(MAX_SEEKER_PROFILES);
        self.store(keys::SEEKER_POSTS, &entries)?;
        Ok(profile)
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.list(keys::FEEDBACK).unwrap_or_default()
    }

    pub fn newsletter(&self) -> Vec<String> {
        self.list(keys::NEWSLETTER).unwrap_or_default()
    }

    pub fn seeker_profiles(&self) -> Vec<SeekerProfile> {
        self.list(keys::SEEKER_POSTS).unwrap_or_default()
    }

    fn list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RepositoryError> {
        read_list(&self.repo, key)
    }

    fn raw_list(&self, key: &str) -> Result<Vec<Value>, RepositoryError> {
        read_list(&self.repo, key)
    }

    fn store<T: serde::Serialize>(&self, key: &str, entries: &[T]) -> Result<(), RepositoryError> {
        write_json(&self.repo, key, entries)
    }
}

fn encode<T: serde::Serialize>(entry: &T) -> Result<Value, SubmissionError> {
    serde_json::to_value(entry).map_err(|err| SubmissionError::storage(err.to_string()))
}
