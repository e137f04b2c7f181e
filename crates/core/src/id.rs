//! Strongly-typed identifiers used across the board.
//!
//! Stored JSON was written by loosely-typed producers, so both identifiers
//! decode leniently: a job id may arrive as an integer, an integral float or
//! a numeric string; a user id may be a number or a string.

use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of a job posting.
///
/// Negative values are reserved for the built-in sample records; positive
/// values are derived from the creation timestamp in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(i64);

impl JobId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Sample/seed records use negative ids.
    pub fn is_seed(&self) -> bool {
        self.0 < 0
    }

    /// The next id after this one (used to step past a collision).
    pub fn succ(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for JobId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for JobId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Self(v));
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Ok(Self(v as i64))
            }
            _ => Err(DomainError::invalid_id(format!("JobId: {s:?}"))),
        }
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JobIdVisitor;

        impl Visitor<'_> for JobIdVisitor {
            type Value = JobId;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("an integer job id or its text form")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<JobId, E> {
                Ok(JobId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<JobId, E> {
                i64::try_from(v)
                    .map(JobId)
                    .map_err(|_| E::custom("job id out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<JobId, E> {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Ok(JobId(v as i64))
                } else {
                    Err(E::custom("job id must be integral"))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<JobId, E> {
                v.parse().map_err(|e: DomainError| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_any(JobIdVisitor)
    }
}

/// Identifier of a registered user.
///
/// Equality and hashing use the string-normalized form, so `42` and `"42"`
/// denote the same user. The original JSON kind is kept for round-trips.
#[derive(Debug, Clone)]
pub struct UserId {
    key: String,
    numeric: bool,
}

impl UserId {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            numeric: false,
        }
    }

    pub fn numeric(value: i64) -> Self {
        Self {
            key: value.to_string(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Empty ids never identify anyone.
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for UserId {}

impl core::hash::Hash for UserId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::numeric(value)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.numeric, self.key.parse::<i64>()) {
            (true, Ok(v)) => serializer.serialize_i64(v),
            _ => serializer.serialize_str(&self.key),
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UserIdVisitor;

        impl Visitor<'_> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a user id (number or string)")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<UserId, E> {
                Ok(UserId::numeric(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<UserId, E> {
                Ok(UserId {
                    key: v.to_string(),
                    numeric: true,
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<UserId, E> {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Ok(UserId::numeric(v as i64))
                } else {
                    Ok(UserId {
                        key: v.to_string(),
                        numeric: true,
                    })
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UserId, E> {
                Ok(UserId::new(v))
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}
