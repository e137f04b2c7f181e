use serde::{Deserialize, Serialize};

use afgjobs_core::UserId;

/// The acting user, as recorded by the sign-in flow.
///
/// Every field is optional in storage; an identity with neither an id nor an
/// email owns nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            email: Some(email.into()),
            fullname: Some(fullname.into()),
        }
    }

    /// Non-blank user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }

    /// Lower-cased, trimmed email used for case-insensitive comparisons.
    pub fn normalized_email(&self) -> Option<String> {
        normalize_email(self.email.as_deref())
    }

    /// Name shown in the signed-in banner.
    pub fn display_name(&self) -> &str {
        self.fullname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("User")
    }
}

pub(crate) fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}
