//! Built-in sample postings installed into an empty board.

use afgjobs_core::JobId;

use crate::job::JobRecord;

struct Sample {
    id: i64,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    location: &'static str,
    contact: &'static str,
    poster_type: &'static str,
    price: f64,
    is_online: bool,
    sample_link: &'static str,
    posted_by_name: &'static str,
    created_at: &'static str,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: -1,
        title: "Social Media Manager for Local Bakery",
        category: "Social Media",
        description: "Create weekly posts, reply to comments, and help improve local visibility on Facebook and Instagram.",
        location: "Kabul",
        contact: "bakery.hiring@example.com",
        poster_type: "Business",
        price: 180.0,
        is_online: true,
        sample_link: "https://example.com/sample-work",
        posted_by_name: "City Bakery",
        created_at: "2026-01-15T09:00:00.000Z",
    },
    Sample {
        id: -2,
        title: "Arabic to Dari Translator Needed",
        category: "Translator",
        description: "Translate short legal and business documents with clear formatting and accurate terminology.",
        location: "Herat",
        contact: "+93 700 123 456",
        poster_type: "Poster",
        price: 120.0,
        is_online: true,
        sample_link: "https://example.com/translation-sample",
        posted_by_name: "Hamid",
        created_at: "2026-01-10T11:30:00.000Z",
    },
    Sample {
        id: -3,
        title: "Part-time Math Tutor (Grade 9-12)",
        category: "Tutor",
        description: "Provide three evening sessions per week for high school students. Prior tutoring experience preferred.",
        location: "Kandahar",
        contact: "tutor.jobs@example.com",
        poster_type: "Poster",
        price: 90.0,
        is_online: false,
        sample_link: "",
        posted_by_name: "Zainab",
        created_at: "2026-01-05T08:45:00.000Z",
    },
];

/// The fixed sample set, newest first. Ids are negative so they never collide
/// with timestamp-derived ids, and no sample carries an owner.
pub fn default_jobs() -> Vec<JobRecord> {
    SAMPLES
        .iter()
        .map(|s| JobRecord {
            id: JobId::new(s.id),
            title: s.title.to_string(),
            category: s.category.to_string(),
            description: s.description.to_string(),
            location: s.location.to_string(),
            contact: s.contact.to_string(),
            poster_type: s.poster_type.to_string(),
            price: Some(s.price),
            currency: crate::job::DEFAULT_CURRENCY.to_string(),
            is_online: s.is_online,
            sample_link: s.sample_link.to_string(),
            portfolio_link: String::new(),
            media: Some(String::new()),
            media_type: Some(String::new()),
            poster_id: None,
            posted_by: None,
            posted_by_name: Some(s.posted_by_name.to_string()),
            created_at: Some(s.created_at.to_string()),
            extra: serde_json::Map::new(),
        })
        .collect()
}
