use afgjobs_core::{validation, DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ANONYMOUS: &str = "Anonymous";

/// Raw feedback form input.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A stored feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: String,
}

impl FeedbackForm {
    /// Validate and stamp the submission. The email is optional but must be
    /// well formed when given.
    pub fn submit(self, at: DateTime<Utc>) -> DomainResult<Feedback> {
        let name = match self.name.trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };
        let email = self.email.trim().to_string();
        let message = self.message.trim().to_string();

        if message.is_empty() {
            return Err(DomainError::validation("Please enter your feedback."));
        }
        if !email.is_empty() && !validation::is_email(&email) {
            return Err(DomainError::validation("Please enter a valid email address."));
        }

        Ok(Feedback {
            name,
            email,
            message,
            timestamp: crate::timestamp(at),
        })
    }
}
