//! Storage keys, shared with the browser build so data stays portable.

/// Current-format job collection.
pub const JOBS: &str = "afg_jobs_data";
/// Legacy job collection; read once for migration, never written.
pub const LEGACY_JOBS: &str = "jobs";
pub const USERS: &str = "afg_users";
pub const THEME: &str = "afg_theme";
pub const CURRENT_USER: &str = "afg_current_user";
pub const SETTINGS: &str = "afg_settings";
pub const FEEDBACK: &str = "afg_feedback";
pub const NEWSLETTER: &str = "afg_newsletter";
pub const SEEKER_POSTS: &str = "afg_job_seeker_posts";
