//! Preferences and the theme flag.

use std::fmt;

use serde_json::Value;

use afgjobs_settings::SettingsRecord;

use crate::keys;
use crate::repository::{read_json, write_json, Repository, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything but `"dark"` reads as light.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "dark" { Self::Dark } else { Self::Light }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore<R> {
    repo: R,
}

impl<R: Repository> SettingsStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored overrides merged over the defaults. Unreadable storage yields
    /// the defaults.
    pub fn load(&self) -> SettingsRecord {
        let overrides = read_json::<_, Value>(&self.repo, keys::SETTINGS).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read settings");
            None
        });
        let stored_theme = self.stored_theme();
        SettingsRecord::merged(&overrides.unwrap_or(Value::Null), stored_theme.as_deref())
    }

    pub fn save(&self, settings: &SettingsRecord) -> Result<(), RepositoryError> {
        write_json(&self.repo, keys::SETTINGS, settings)
    }

    pub fn theme(&self) -> Theme {
        self.stored_theme().map(|t| Theme::parse(&t)).unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), RepositoryError> {
        self.repo.set(keys::THEME, theme.as_str())
    }

    fn stored_theme(&self) -> Option<String> {
        self.repo
            .get(keys::THEME)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "could not read theme");
                None
            })
            .filter(|t| !t.is_empty())
    }
}
