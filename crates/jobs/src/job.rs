use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use afgjobs_auth::{Identity, Owned};
use afgjobs_core::validation::{has_http_scheme, is_contact};
use afgjobs_core::{DomainError, DomainResult, Entity, JobId, UserId};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Largest media payload accepted with a posting (decoded bytes).
pub const MAX_MEDIA_BYTES: usize = 2 * 1024 * 1024;

/// Shortest accepted posting description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A stored job posting.
///
/// Field names follow the persisted camelCase JSON. Keys this type does not
/// know about are kept in `extra` so a rewrite of the collection does not
/// drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub contact: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub poster_type: String,
    #[serde(
        default,
        deserialize_with = "lenient::price",
        serialize_with = "lenient::serialize_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default = "default_currency", deserialize_with = "lenient::text")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_online: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sample_link: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub portfolio_link: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub media: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub posted_by_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobRecord {
    /// Budget used for ordering; missing or non-numeric prices count as 0.
    pub fn price_or_zero(&self) -> f64 {
        self.price.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    /// Creation time in epoch milliseconds; missing or unparsable is 0.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|t| t.timestamp_millis())
            .unwrap_or(0)
    }

    pub fn media_attachment(&self) -> Option<MediaAttachment> {
        let data = self.media.as_deref().filter(|m| !m.is_empty())?;
        Some(MediaAttachment {
            data: data.to_string(),
            mime: self.media_type.clone().unwrap_or_default(),
        })
    }
}

impl Entity for JobRecord {
    type Id = JobId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Owned for JobRecord {
    fn poster_id(&self) -> Option<&UserId> {
        self.poster_id.as_ref()
    }

    fn posted_by(&self) -> Option<&str> {
        self.posted_by.as_deref()
    }
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Encoded media payload (typically a data URL) and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub data: String,
    pub mime: String,
}

impl MediaAttachment {
    pub fn is_video(&self) -> bool {
        self.mime.contains("video")
    }

    /// Size of the payload once decoded.
    ///
    /// For a base64 data URL this is the decoded length; anything else counts
    /// its raw length.
    pub fn decoded_len(&self) -> usize {
        match self.data.split_once(',') {
            Some((header, body)) if header.starts_with("data:") && header.ends_with(";base64") => {
                let body = body.trim_end();
                let padding = body.chars().rev().take_while(|c| *c == '=').count();
                ((body.len() / 4) * 3 + (body.len() % 4) * 3 / 4).saturating_sub(padding.min(2))
            }
            Some((header, body)) if header.starts_with("data:") => body.len(),
            _ => self.data.len(),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if !self.mime.starts_with("image/") && !self.mime.starts_with("video/") {
            return Err(DomainError::validation("Please upload an image or video file."));
        }
        if self.decoded_len() > MAX_MEDIA_BYTES {
            return Err(DomainError::validation(
                "File is too large. Please choose a file under 2MB.",
            ));
        }
        Ok(())
    }
}

/// Input to posting creation: everything except the id and creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJob {
    pub title: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub poster_type: String,
    pub price: f64,
    pub currency: String,
    pub is_online: bool,
    pub sample_link: String,
    pub portfolio_link: String,
    pub media: Option<MediaAttachment>,
    pub poster_id: Option<UserId>,
    pub posted_by: Option<String>,
    pub posted_by_name: Option<String>,
}

impl NewJob {
    /// Trim every free-text field, and default the currency.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.title,
            &mut self.category,
            &mut self.description,
            &mut self.location,
            &mut self.contact,
            &mut self.poster_type,
            &mut self.sample_link,
            &mut self.portfolio_link,
        ] {
            *field = field.trim().to_string();
        }
        self.currency = match self.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            other => other.to_string(),
        };
        self
    }

    /// Stamp the posting with the identity creating it.
    pub fn attributed_to(mut self, identity: &Identity) -> Self {
        self.poster_id = identity.user_id().cloned();
        self.posted_by = identity.email.clone().filter(|e| !e.trim().is_empty());
        self.posted_by_name = identity.fullname.clone();
        self
    }

    /// Posting rules, checked in the order the form reports them.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            &self.title,
            &self.category,
            &self.description,
            &self.location,
            &self.contact,
            &self.poster_type,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(DomainError::validation("Please fill in all required fields."));
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("Please enter a valid price."));
        }

        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(DomainError::validation(
                "Description must be at least 20 characters.",
            ));
        }

        if !is_contact(&self.contact) {
            return Err(DomainError::validation(
                "Please enter a valid email or phone number.",
            ));
        }

        let sample_link = self.sample_link.trim();
        if self.is_online && sample_link.is_empty() {
            return Err(DomainError::validation(
                "Please add a sample link for online jobs.",
            ));
        }
        if !sample_link.is_empty() && !has_http_scheme(sample_link) {
            return Err(DomainError::validation(
                "Sample link must start with http:// or https://",
            ));
        }

        let portfolio_link = self.portfolio_link.trim();
        if !portfolio_link.is_empty() && !has_http_scheme(portfolio_link) {
            return Err(DomainError::validation(
                "Portfolio link must start with http:// or https://",
            ));
        }

        if let Some(media) = &self.media {
            media.validate()?;
        }

        let has_poster_id = self.poster_id.as_ref().is_some_and(|id| !id.is_blank());
        let has_posted_by = self.posted_by.as_deref().is_some_and(|e| !e.trim().is_empty());
        if !has_poster_id && !has_posted_by {
            return Err(DomainError::validation(
                "A posting must be attributed to a signed-in user.",
            ));
        }

        Ok(())
    }

    /// Materialize the stored record under an assigned id and creation time.
    pub fn into_record(self, id: JobId, created_at: DateTime<Utc>) -> JobRecord {
        let (media, media_type) = match self.media {
            Some(m) => (Some(m.data), Some(m.mime)),
            None => (None, None),
        };
        JobRecord {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            location: self.location,
            contact: self.contact,
            poster_type: self.poster_type,
            price: Some(self.price),
            currency: if self.currency.trim().is_empty() {
                default_currency()
            } else {
                self.currency
            },
            is_online: self.is_online,
            sample_link: self.sample_link,
            portfolio_link: self.portfolio_link,
            media,
            media_type,
            poster_id: self.poster_id,
            posted_by: self.posted_by,
            posted_by_name: self.posted_by_name,
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            extra: serde_json::Map::new(),
        }
    }
}

/// Decoders tolerant of values written by loosely-typed producers.
mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_text(d)?.unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(D::Error::custom(format!("expected text, found {other}"))),
        }
    }

    pub fn price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::String(s) => matches!(s.trim(), "on" | "true" | "1"),
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        })
    }

    pub fn serialize_price<S: Serializer>(price: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match price {
            Some(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
                s.serialize_i64(*v as i64)
            }
            Some(v) => s.serialize_f64(*v),
            None => s.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> NewJob {
        NewJob {
            title: "Logo design".into(),
            category: "Design".into(),
            description: "Design a clean logo for a small tailoring shop.".into(),
            location: "Mazar".into(),
            contact: "owner@example.com".into(),
            poster_type: "Business".into(),
            price: 50.0,
            currency: "USD".into(),
            posted_by: Some("owner@example.com".into()),
            ..Default::default()
        }
    }

    fn assert_rejected(draft: NewJob, fragment: &str) {
        match draft.validate() {
            Err(DomainError::Validation(msg)) if msg.contains(fragment) => {}
            other => panic!("expected validation error containing {fragment:?}, got {other:?}"),
        }
    }

    #[test]
    fn valid_draft_passes() {
        valid_draft().validate().unwrap();
    }

    #[test]
    fn missing_required_field_is_rejected() {
        assert_rejected(
            NewJob {
                location: "  ".into(),
                ..valid_draft()
            },
            "required fields",
        );
    }

    #[test]
    fn negative_or_nan_price_is_rejected() {
        assert_rejected(NewJob { price: -1.0, ..valid_draft() }, "valid price");
        assert_rejected(NewJob { price: f64::NAN, ..valid_draft() }, "valid price");
    }

    #[test]
    fn short_description_is_rejected() {
        assert_rejected(
            NewJob {
                description: "too short".into(),
                ..valid_draft()
            },
            "at least 20",
        );
    }

    #[test]
    fn bad_contact_is_rejected() {
        assert_rejected(
            NewJob {
                contact: "ask at the shop".into(),
                ..valid_draft()
            },
            "email or phone",
        );
    }

    #[test]
    fn online_jobs_need_an_http_sample_link() {
        assert_rejected(NewJob { is_online: true, ..valid_draft() }, "sample link for online");
        assert_rejected(
            NewJob {
                is_online: true,
                sample_link: "example.com/work".into(),
                ..valid_draft()
            },
            "Sample link must start",
        );
        NewJob {
            is_online: true,
            sample_link: "https://example.com/work".into(),
            ..valid_draft()
        }
        .validate()
        .unwrap();
    }

    #[test]
    fn portfolio_link_must_be_http() {
        assert_rejected(
            NewJob {
                portfolio_link: "ftp://example.com".into(),
                ..valid_draft()
            },
            "Portfolio link",
        );
    }

    #[test]
    fn media_must_be_image_or_video_and_small() {
        let pdf = MediaAttachment {
            data: "data:application/pdf;base64,AAAA".into(),
            mime: "application/pdf".into(),
        };
        assert_rejected(NewJob { media: Some(pdf), ..valid_draft() }, "image or video");

        let huge = MediaAttachment {
            data: format!("data:image/png;base64,{}", "A".repeat(MAX_MEDIA_BYTES / 3 * 4 + 8)),
            mime: "image/png".into(),
        };
        assert_rejected(NewJob { media: Some(huge), ..valid_draft() }, "under 2MB");
    }

    #[test]
    fn unattributed_draft_is_rejected() {
        assert_rejected(
            NewJob {
                posted_by: None,
                ..valid_draft()
            },
            "signed-in",
        );
    }

    #[test]
    fn attribution_copies_identity() {
        let identity = Identity::new(9_i64, "me@example.com", "Me");
        let draft = NewJob::default().attributed_to(&identity);
        assert_eq!(draft.poster_id, Some(UserId::numeric(9)));
        assert_eq!(draft.posted_by.as_deref(), Some("me@example.com"));
        assert_eq!(draft.posted_by_name.as_deref(), Some("Me"));
    }

    #[test]
    fn normalized_trims_and_defaults_currency() {
        let draft = NewJob {
            title: "  Title ".into(),
            currency: " ".into(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.currency, "USD");
    }

    #[test]
    fn into_record_stamps_id_and_iso_timestamp() {
        let at = DateTime::<Utc>::from_timestamp_millis(1_768_467_600_123).unwrap();
        let record = valid_draft().into_record(JobId::new(1_768_467_600_123), at);
        assert_eq!(record.created_at.as_deref(), Some("2026-01-15T09:00:00.123Z"));
        assert_eq!(record.created_at_millis(), 1_768_467_600_123);
        assert_eq!(record.price, Some(50.0));
    }

    #[test]
    fn record_decodes_loosely_typed_json_and_keeps_unknown_keys() {
        let raw = r#"{
            "id": "1700000000000",
            "title": "Driver",
            "price": "75",
            "isOnline": "on",
            "media": null,
            "posterId": 12,
            "createdAt": "2026-01-02",
            "badge": "urgent"
        }"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, JobId::new(1_700_000_000_000));
        assert_eq!(record.price_or_zero(), 75.0);
        assert!(record.is_online);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.media, None);
        assert_eq!(record.created_at_millis(), 1_767_312_000_000);
        assert_eq!(record.extra.get("badge"), Some(&serde_json::json!("urgent")));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["price"], serde_json::json!(75));
        assert_eq!(back["posterId"], serde_json::json!(12));
        assert_eq!(back["badge"], serde_json::json!("urgent"));
    }

    #[test]
    fn non_numeric_price_and_bad_timestamp_default_to_zero() {
        let record: JobRecord =
            serde_json::from_str(r#"{"id": 1, "price": "negotiable", "createdAt": "soon"}"#).unwrap();
        assert_eq!(record.price, None);
        assert_eq!(record.price_or_zero(), 0.0);
        assert_eq!(record.created_at_millis(), 0);
    }

    #[test]
    fn base64_decoded_length() {
        let media = MediaAttachment {
            data: "data:image/png;base64,QUJD".into(),
            mime: "image/png".into(),
        };
        assert_eq!(media.decoded_len(), 3);
        let padded = MediaAttachment {
            data: "data:image/png;base64,QUI=".into(),
            mime: "image/png".into(),
        };
        assert_eq!(padded.decoded_len(), 2);
    }
}
