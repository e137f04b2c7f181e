use afgjobs_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("could not save submission: {0}")]
    Storage(String),
}

impl SubmissionError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Text shown next to the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(err) => err.user_message(),
            Self::Storage(_) => "Could not save. Please try again.".to_string(),
        }
    }
}
