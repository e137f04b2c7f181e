use std::fmt;

use afgjobs_core::{validation, DomainError, DomainResult};

/// A validated, lower-cased subscriber address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewsletterEmail(String);

impl NewsletterEmail {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let email = raw.trim().to_lowercase();
        if !validation::is_email(&email) {
            return Err(DomainError::validation("Enter a valid email address."));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NewsletterEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append `email` unless it is already on the list. Returns whether the list
/// changed.
pub fn subscribe(list: &mut Vec<String>, email: &NewsletterEmail) -> bool {
    if list.iter().any(|existing| existing == email.as_str()) {
        return false;
    }
    list.push(email.0.clone());
    true
}
