//! Ownership predicate for user-submitted resources.
//!
//! A resource is owned by an identity when the stored poster id equals the
//! identity's id (string-normalized), or when the stored poster email equals
//! the identity's email ignoring case. A matching display name is never
//! enough.

use serde::Serialize;
use thiserror::Error;

use afgjobs_core::UserId;

use crate::identity::{normalize_email, Identity};

/// Attribution carried by a resource that can be owned.
pub trait Owned {
    fn poster_id(&self) -> Option<&UserId>;
    fn posted_by(&self) -> Option<&str>;
}

/// Which attribute established ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipMatch {
    ById,
    ByEmail,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("no signed-in identity")]
    Anonymous,

    #[error("identity does not own this resource")]
    NotOwner,
}

/// Decide ownership, reporting which attribute matched.
pub fn ownership<R>(resource: &R, identity: Option<&Identity>) -> Option<OwnershipMatch>
where
    R: Owned + ?Sized,
{
    let identity = identity?;

    if let (Some(poster), Some(user)) = (resource.poster_id(), identity.user_id()) {
        if !poster.is_blank() && poster == user {
            return Some(OwnershipMatch::ById);
        }
    }

    if let (Some(posted_by), Some(email)) = (
        normalize_email(resource.posted_by()),
        identity.normalized_email(),
    ) {
        if posted_by == email {
            return Some(OwnershipMatch::ByEmail);
        }
    }

    None
}

pub fn is_owner<R>(resource: &R, identity: Option<&Identity>) -> bool
where
    R: Owned + ?Sized,
{
    ownership(resource, identity).is_some()
}

/// Like [`ownership`], but as a typed failure for command boundaries.
pub fn require_owner<R>(
    resource: &R,
    identity: Option<&Identity>,
) -> Result<OwnershipMatch, OwnershipError>
where
    R: Owned + ?Sized,
{
    if identity.is_none() {
        return Err(OwnershipError::Anonymous);
    }
    ownership(resource, identity).ok_or_else(|| {
        tracing::debug!("ownership check failed");
        OwnershipError::NotOwner
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Posting {
        poster_id: Option<UserId>,
        posted_by: Option<String>,
    }

    impl Owned for Posting {
        fn poster_id(&self) -> Option<&UserId> {
            self.poster_id.as_ref()
        }

        fn posted_by(&self) -> Option<&str> {
            self.posted_by.as_deref()
        }
    }

    fn posting(poster_id: Option<UserId>, posted_by: Option<&str>) -> Posting {
        Posting {
            poster_id,
            posted_by: posted_by.map(str::to_string),
        }
    }

    #[test]
    fn numeric_and_string_ids_match() {
        let job = posting(Some(UserId::numeric(77)), None);
        let user = Identity {
            id: Some(UserId::new("77")),
            ..Default::default()
        };
        assert_eq!(ownership(&job, Some(&user)), Some(OwnershipMatch::ById));
    }

    #[test]
    fn email_matches_case_insensitively() {
        let job = posting(None, Some("Hamid@Example.com"));
        let user = Identity {
            email: Some("hamid@example.COM".into()),
            ..Default::default()
        };
        assert_eq!(ownership(&job, Some(&user)), Some(OwnershipMatch::ByEmail));
    }

    #[test]
    fn name_alone_never_matches() {
        let job = posting(None, None);
        let user = Identity {
            fullname: Some("Hamid".into()),
            ..Default::default()
        };
        assert!(!is_owner(&job, Some(&user)));
    }

    #[test]
    fn blank_attributes_never_match() {
        let job = posting(Some(UserId::new("")), Some(""));
        let user = Identity {
            id: Some(UserId::new("")),
            email: Some("  ".into()),
            fullname: None,
        };
        assert!(!is_owner(&job, Some(&user)));
    }

    #[test]
    fn anonymous_is_rejected() {
        let job = posting(Some(UserId::numeric(1)), None);
        assert!(!is_owner(&job, None));
        assert_eq!(require_owner(&job, None), Err(OwnershipError::Anonymous));
    }

    #[test]
    fn different_user_is_not_owner() {
        let job = posting(Some(UserId::numeric(1)), Some("a@example.com"));
        let user = Identity::new(2_i64, "b@example.com", "B");
        assert_eq!(require_owner(&job, Some(&user)), Err(OwnershipError::NotOwner));
    }
}
