use afgjobs_core::{validation, DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_SEEKER_PROFILES: usize = 200;
const MIN_SKILLS_CHARS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct SeekerForm {
    pub name: String,
    pub location: String,
    pub skills: String,
    pub contact: String,
}

/// A job-seeker profile as stored, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerProfile {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub skills: String,
    pub contact: String,
    pub created_at: String,
}

impl SeekerForm {
    pub fn submit(self, at: DateTime<Utc>) -> DomainResult<SeekerProfile> {
        let name = self.name.trim().to_string();
        let location = self.location.trim().to_string();
        let skills = self.skills.trim().to_string();
        let contact = self.contact.trim().to_string();

        if name.is_empty() || location.is_empty() || skills.is_empty() || contact.is_empty() {
            return Err(DomainError::validation("Please complete all fields."));
        }
        if skills.chars().count() < MIN_SKILLS_CHARS {
            return Err(DomainError::validation(
                "Please add at least 20 characters about your skills.",
            ));
        }
        if !validation::is_contact(&contact) {
            return Err(DomainError::validation(
                "Contact must be a valid email or phone number.",
            ));
        }

        Ok(SeekerProfile {
            id: at.timestamp_millis(),
            name,
            location,
            skills,
            contact,
            created_at: crate::timestamp(at),
        })
    }
}

/// `id`, stepped forward past every id for which `taken` holds.
pub fn unique_id(mut id: i64, taken: impl Fn(i64) -> bool) -> i64 {
    while taken(id) {
        id = id.saturating_add(1);
    }
    id
}
