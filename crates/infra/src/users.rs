//! Registered users and the signed-in session, as stored by the auth pages.

use afgjobs_auth::Identity;

use crate::keys;
use crate::repository::{read_json, read_list, Repository, RepositoryError};

#[derive(Debug, Clone)]
pub struct UserDirectory<R> {
    repo: R,
}

impl<R: Repository> UserDirectory<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registered users; a missing or corrupt list is empty and entries
    /// that are not user objects are skipped.
    pub fn users(&self) -> Vec<Identity> {
        read_list(&self.repo, keys::USERS).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read users");
            Vec::new()
        })
    }

    /// The signed-in identity, if any.
    pub fn current_user(&self) -> Option<Identity> {
        match read_json::<_, Option<Identity>>(&self.repo, keys::CURRENT_USER) {
            Ok(user) => user.flatten(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read current user");
                None
            }
        }
    }

    pub fn sign_out(&self) -> Result<(), RepositoryError> {
        self.repo.remove(keys::CURRENT_USER)?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use std::sync::Arc;

    #[test]
    fn users_skip_junk_and_tolerate_corruption() {
        let repo = InMemoryRepository::new();
        repo.set(
            keys::USERS,
            r#"[{"id": 1, "email": "a@b.co", "fullname": "A", "password": "x"}, 5, null, {"email": "c@d.co"}]"#,
        )
        .unwrap();
        let dir = UserDirectory::new(repo);
        let users = dir.users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].display_name(), "A");
        assert_eq!(users[1].id, None);

        let corrupt = InMemoryRepository::new();
        corrupt.set(keys::USERS, "{}").unwrap();
        assert!(UserDirectory::new(corrupt).users().is_empty());
    }

    #[test]
    fn session_lifecycle() {
        let repo = Arc::new(InMemoryRepository::new());
        let dir = UserDirectory::new(Arc::clone(&repo));
        assert_eq!(dir.current_user(), None);

        repo.set(keys::CURRENT_USER, "null").unwrap();
        assert_eq!(dir.current_user(), None);

        repo.set(keys::CURRENT_USER, r#"{"id": "u-9", "email": "me@x.io"}"#).unwrap();
        let me = dir.current_user().unwrap();
        assert_eq!(me.display_name(), "User");
        assert_eq!(me.user_id().map(|id| id.as_str()), Some("u-9"));

        dir.sign_out().unwrap();
        assert_eq!(dir.current_user(), None);
    }
}
