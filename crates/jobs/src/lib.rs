//! Job postings domain module.
//!
//! This crate contains the posting record, its creation rules, the built-in
//! sample set and the search/filter/sort pipeline, implemented purely as
//! deterministic logic (no IO, no storage, no rendering).

pub mod card;
pub mod job;
pub mod listing;
pub mod search;
pub mod seed;
pub mod stats;

pub use card::{JobCard, MediaKind};
pub use job::{JobRecord, MediaAttachment, NewJob, DEFAULT_CURRENCY, MAX_MEDIA_BYTES};
pub use listing::{count_label, publish, ListContainer, ListingRenderer};
pub use search::{query, QueryDefaults, QueryState, SearchResults, SortKey, ALL_CATEGORIES};
pub use seed::default_jobs;
pub use stats::BoardStats;
