//! Display-safe view of a posting for the presentation layer.
//!
//! Every text field is already escaped; the renderer only arranges it.

use serde::Serialize;

use afgjobs_core::validation::{escape_html, safe_http_url};

use crate::job::{JobRecord, DEFAULT_CURRENCY};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub poster_type: String,
    pub description_preview: String,
    pub truncated: bool,
    pub budget: Option<String>,
    pub sample_url: Option<String>,
    pub media: Option<(MediaKind, String)>,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{price}")
    }
}

impl JobCard {
    pub fn from_record(job: &JobRecord) -> Self {
        let preview: String = job.description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        let truncated = job.description.chars().count() > DESCRIPTION_PREVIEW_CHARS;

        let budget = job.price.filter(|p| p.is_finite()).map(|p| {
            format!(
                "{} {}",
                escape_html(or_default(&job.currency, DEFAULT_CURRENCY)),
                format_price(p)
            )
        });

        let sample_url = if job.is_online {
            safe_http_url(&job.sample_link).map(|u| escape_html(&u))
        } else {
            None
        };

        let media = job.media_attachment().map(|m| {
            let kind = if m.is_video() { MediaKind::Video } else { MediaKind::Image };
            (kind, m.data)
        });

        Self {
            id: job.id.to_string(),
            title: escape_html(or_default(&job.title, "Untitled")),
            category: escape_html(or_default(&job.category, "Other")),
            location: escape_html(or_default(&job.location, "Remote")),
            poster_type: escape_html(or_default(&job.poster_type, "Poster")),
            description_preview: escape_html(&preview),
            truncated,
            budget,
            sample_url,
            media,
        }
    }

    /// Link to the posting's detail page.
    pub fn detail_href(&self) -> String {
        format!("job-detail.html?id={}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_jobs;

    #[test]
    fn seed_card_has_budget_and_sample_link() {
        let card = JobCard::from_record(&default_jobs()[0]);
        assert_eq!(card.budget.as_deref(), Some("USD 180"));
        assert_eq!(card.sample_url.as_deref(), Some("https://example.com/sample-work"));
        assert_eq!(card.detail_href(), "job-detail.html?id=-1");
        assert!(!card.truncated);
        assert!(card.media.is_none());
    }

    #[test]
    fn long_description_is_cut_at_one_hundred_chars() {
        let card = JobCard::from_record(&default_jobs()[2]);
        assert!(card.truncated);
        assert_eq!(card.description_preview.chars().count(), 100);
    }

    #[test]
    fn offline_job_hides_sample_link() {
        let mut job = default_jobs()[2].clone();
        job.sample_link = "https://example.com/x".into();
        assert!(JobCard::from_record(&job).sample_url.is_none());
    }

    #[test]
    fn unsafe_link_and_markup_are_neutralized() {
        let mut job = default_jobs()[0].clone();
        job.title = "<script>alert(1)</script>".into();
        job.sample_link = "javascript:alert(1)".into();
        let card = JobCard::from_record(&job);
        assert_eq!(card.title, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(card.sample_url.is_none());
    }

    #[test]
    fn blank_fields_get_placeholders() {
        let mut job = default_jobs()[1].clone();
        job.title.clear();
        job.category.clear();
        job.location.clear();
        job.poster_type.clear();
        job.price = None;
        let card = JobCard::from_record(&job);
        assert_eq!(
            (card.title.as_str(), card.category.as_str(), card.location.as_str(), card.poster_type.as_str()),
            ("Untitled", "Other", "Remote", "Poster")
        );
        assert!(card.budget.is_none());
    }

    #[test]
    fn video_media_is_detected() {
        let mut job = default_jobs()[0].clone();
        job.media = Some("data:video/mp4;base64,AAAA".into());
        job.media_type = Some("video/mp4".into());
        let card = JobCard::from_record(&job);
        assert_eq!(card.media.map(|(k, _)| k), Some(MediaKind::Video));
    }
}
