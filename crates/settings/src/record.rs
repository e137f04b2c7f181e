use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use afgjobs_jobs::{QueryDefaults, SortKey, ALL_CATEGORIES, DEFAULT_CURRENCY};

use crate::posting::PostingDefaults;

pub const DEFAULT_THEME: &str = "light";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notifications {
    pub weekly_digest: bool,
    pub job_alerts: bool,
    pub product_updates: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            weekly_digest: true,
            job_alerts: true,
            product_updates: false,
            extra: Map::new(),
        }
    }
}

/// Effective user preferences.
///
/// Stored settings are partial; [`SettingsRecord::merged`] layers them over
/// [`SettingsRecord::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub theme: String,
    pub job_search: String,
    pub job_category: String,
    pub job_sort: String,
    pub default_poster_type: String,
    pub default_category: String,
    pub default_currency: String,
    pub default_location: String,
    pub default_online: bool,
    pub notifications: Notifications,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            job_search: String::new(),
            job_category: ALL_CATEGORIES.to_string(),
            job_sort: SortKey::Newest.as_str().to_string(),
            default_poster_type: "Company".to_string(),
            default_category: String::new(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_location: String::new(),
            default_online: false,
            notifications: Notifications::default(),
            extra: Map::new(),
        }
    }
}

impl SettingsRecord {
    /// Layer stored overrides over the defaults.
    ///
    /// Top-level keys replace defaults wholesale; `notifications` merges one
    /// level deep. A key whose value has the wrong type keeps its default
    /// without affecting the others. The theme comes from the overrides when
    /// set, else from `theme_fallback` (the separately stored theme), else the
    /// default. Overrides that are not an object count as empty.
    pub fn merged(overrides: &Value, theme_fallback: Option<&str>) -> Self {
        let empty = Map::new();
        let overrides = overrides.as_object().unwrap_or(&empty);

        let defaults = Self::default();
        let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
            return defaults;
        };

        for (key, value) in overrides {
            match (key.as_str(), value) {
                ("theme", _) => {}
                ("notifications", Value::Object(patch)) => {
                    for (field, flag) in patch {
                        let mut candidate = merged.clone();
                        if let Some(Value::Object(target)) = candidate.get_mut("notifications") {
                            target.insert(field.clone(), flag.clone());
                        }
                        accept(&mut merged, candidate, field);
                    }
                }
                ("notifications", _) => {}
                _ => {
                    let mut candidate = merged.clone();
                    candidate.insert(key.clone(), value.clone());
                    accept(&mut merged, candidate, key);
                }
            }
        }

        let theme = overrides
            .get("theme")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .or(theme_fallback.filter(|t| !t.is_empty()))
            .unwrap_or(DEFAULT_THEME);
        merged.insert("theme".to_string(), Value::String(theme.to_string()));

        serde_json::from_value(Value::Object(merged)).unwrap_or(Self {
            theme: theme.to_string(),
            ..defaults
        })
    }

    /// Query-state defaults for the job list; blank values are "not set".
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            search_text: non_empty(&self.job_search),
            category: non_empty(&self.job_category),
            sort: non_empty(&self.job_sort).map(|s| SortKey::parse(&s)),
        }
    }

    /// Prefill values for the posting form.
    pub fn posting_defaults(&self) -> PostingDefaults {
        PostingDefaults {
            poster_type: non_empty(&self.default_poster_type),
            category: non_empty(&self.default_category),
            currency: non_empty(&self.default_currency),
            location: non_empty(&self.default_location),
            online: self.default_online,
        }
    }
}

/// Keep `candidate` when it still decodes as a record.
fn accept(merged: &mut Map<String, Value>, candidate: Map<String, Value>, key: &str) {
    match serde_json::from_value::<SettingsRecord>(Value::Object(candidate.clone())) {
        Ok(_) => *merged = candidate,
        Err(err) => tracing::warn!(key, error = %err, "ignoring stored setting with unexpected type"),
    }
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}
