use afgjobs_jobs::NewJob;

/// Prefill values for a new posting, taken from settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingDefaults {
    pub poster_type: Option<String>,
    pub category: Option<String>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub online: bool,
}

impl PostingDefaults {
    /// Prefill a draft.
    ///
    /// Poster type and currency always take the default when one is set.
    /// Category and location only fill blanks. `online` can only switch the
    /// flag on.
    pub fn apply_to(&self, mut draft: NewJob) -> NewJob {
        if let Some(poster_type) = &self.poster_type {
            draft.poster_type = poster_type.clone();
        }
        if let Some(category) = &self.category {
            if draft.category.is_empty() {
                draft.category = category.clone();
            }
        }
        if let Some(currency) = &self.currency {
            draft.currency = currency.clone();
        }
        if let Some(location) = &self.location {
            if draft.location.is_empty() {
                draft.location = location.clone();
            }
        }
        if self.online {
            draft.is_online = true;
        }
        draft
    }
}
