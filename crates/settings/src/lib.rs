//! User preferences: a defaulted record that stored overrides are layered on.

pub mod posting;
pub mod record;

pub use posting::PostingDefaults;
pub use record::{Notifications, SettingsRecord, DEFAULT_THEME};
