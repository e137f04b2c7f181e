//! Search/filter/sort pipeline.
//!
//! `query` is a pure function of the collection and the query state: it never
//! touches storage, and equal inputs always give equal output. Callers re-run
//! it whenever the search text, category or sort key changes.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::job::JobRecord;
use crate::listing::count_label;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Number of leading results shown in the featured strip.
pub const FEATURED_LIMIT: usize = 3;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recent `createdAt` first.
    #[default]
    Newest,
    BudgetHigh,
    BudgetLow,
}

impl SortKey {
    /// Lenient parse: unknown keys fall back to [`SortKey::Newest`].
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::BudgetHigh => "budget-high",
            SortKey::BudgetLow => "budget-low",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" => Ok(SortKey::Newest),
            "budget-high" => Ok(SortKey::BudgetHigh),
            "budget-low" => Ok(SortKey::BudgetLow),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient search/filter/sort criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub search_text: String,
    pub category: String,
    pub sort: SortKey,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Stored defaults for the initial query; `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDefaults {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortKey>,
}

impl QueryState {
    pub fn new(search_text: impl Into<String>, category: impl Into<String>, sort: SortKey) -> Self {
        Self {
            search_text: search_text.into(),
            category: category.into(),
            sort,
        }
    }

    /// The state after "clear filters".
    pub fn cleared() -> Self {
        Self::new("", ALL_CATEGORIES, SortKey::Newest)
    }

    /// Lower-cased, trimmed search needle.
    pub fn needle(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    fn category_filter(&self) -> Option<&str> {
        match self.category.as_str() {
            "" | ALL_CATEGORIES => None,
            other => Some(other),
        }
    }

    /// Whether any narrowing filter is active (sorting does not count).
    pub fn has_filters(&self) -> bool {
        !self.needle().is_empty() || self.category_filter().is_some()
    }

    /// Filter predicate: text match on title/description/location AND exact category.
    pub fn matches(&self, job: &JobRecord) -> bool {
        matches_with(&self.needle(), self.category_filter(), job)
    }

    /// Resolve the initial query state.
    ///
    /// A non-empty `search` parameter in the navigation query string wins and
    /// is applied on top of the current control values. Otherwise each stored
    /// default that is set replaces the corresponding control value.
    pub fn resolve(url_query: Option<&str>, controls: &QueryState, defaults: &QueryDefaults) -> Self {
        if let Some(search) = url_query.and_then(|q| query_param(q, "search")).filter(|s| !s.is_empty()) {
            return Self {
                search_text: search,
                ..controls.clone()
            };
        }

        Self {
            search_text: defaults
                .search_text
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| controls.search_text.clone()),
            category: defaults
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| controls.category.clone()),
            sort: defaults.sort.unwrap_or(controls.sort),
        }
    }
}

fn matches_with(needle: &str, category: Option<&str>, job: &JobRecord) -> bool {
    let text_ok = needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
        || job.location.to_lowercase().contains(needle);
    let category_ok = category.is_none_or(|c| job.category == c);
    text_ok && category_ok
}

/// Filter, then stable-sort, the collection.
pub fn query(collection: &[JobRecord], state: &QueryState) -> Vec<JobRecord> {
    let needle = state.needle();
    let category = state.category_filter();

    let mut filtered: Vec<JobRecord> = collection
        .iter()
        .filter(|job| matches_with(&needle, category, job))
        .cloned()
        .collect();

    // `sort_by` is stable: equal keys keep their collection order.
    match state.sort {
        SortKey::BudgetHigh => {
            filtered.sort_by(|a, b| b.price_or_zero().total_cmp(&a.price_or_zero()))
        }
        SortKey::BudgetLow => {
            filtered.sort_by(|a, b| a.price_or_zero().total_cmp(&b.price_or_zero()))
        }
        SortKey::Newest => filtered.sort_by_key(|job| core::cmp::Reverse(job.created_at_millis())),
    }

    filtered
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub state: QueryState,
    pub jobs: Vec<JobRecord>,
}

impl SearchResults {
    pub fn run(collection: &[JobRecord], state: &QueryState) -> Self {
        Self {
            state: state.clone(),
            jobs: query(collection, state),
        }
    }

    /// Leading slice of the same result, never filtered separately.
    pub fn featured(&self) -> &[JobRecord] {
        &self.jobs[..self.jobs.len().min(FEATURED_LIMIT)]
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn count_label(&self) -> String {
        count_label(self.jobs.len())
    }

    /// Whether the "clear filters" control should be offered.
    pub fn show_clear_filters(&self) -> bool {
        self.state.has_filters()
    }
}

/// First value of `name` in a URL query string (`?a=1&b=2`), form-decoded.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
