//! `afgjobs-auth`: locally-trusted identity and ownership checks.
//!
//! No storage here. Callers obtain an [`Identity`] from wherever the session
//! lives and ask whether it owns a resource.

pub mod identity;
pub mod ownership;

pub use identity::Identity;
pub use ownership::{is_owner, ownership, Owned, OwnershipError, OwnershipMatch, require_owner};
