//! Community submissions that ride alongside the job board: feedback,
//! newsletter sign-ups and job-seeker profiles.
//!
//! Everything here is pure; persistence lives in `afgjobs-infra`.

pub mod error;
pub mod feedback;
pub mod newsletter;
pub mod seeker;

pub use error::SubmissionError;
pub use feedback::{Feedback, FeedbackForm};
pub use newsletter::{subscribe, NewsletterEmail};
pub use seeker::{unique_id, SeekerForm, SeekerProfile, MAX_SEEKER_PROFILES};

use chrono::{DateTime, SecondsFormat, Utc};

pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
