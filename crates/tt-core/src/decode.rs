//! # Trip Decoding
//!
//! Maps raw store documents onto the `Trip` model. Optional fields fall back
//! to defaults; required fields and the date/capacity invariants are checked
//! here so nothing downstream has to.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::catalog::find_category;
use crate::error::DecodeError;
use crate::models::{RawDocument, Trip};

/// Name shown when a document carries no creator name.
pub const UNKNOWN_CREATOR: &str = "Unknown";

/// Decodes one stored document. `now` stands in for absent bookkeeping
/// timestamps.
pub fn decode_trip(doc: &RawDocument, now: DateTime<Utc>) -> Result<Trip, DecodeError> {
    let f = Fields { id: &doc.id, map: &doc.fields };

    let created_by_id = f.required_str("userId")?;
    if created_by_id.is_empty() {
        return Err(DecodeError::MissingField("userId"));
    }

    let start_date = f.required_timestamp("startDate")?;
    let end_date = f.required_timestamp("endDate")?;
    if start_date > end_date {
        return Err(DecodeError::InvalidDates);
    }

    let max_group_size = f.required_count("maxGroupSize")?;
    if max_group_size == 0 {
        return Err(DecodeError::InvalidCapacity);
    }
    let current_member_count = f.optional_count("currentMemberCount")?.unwrap_or(0);
    if current_member_count > max_group_size {
        return Err(DecodeError::OverCapacity {
            current: current_member_count,
            max: max_group_size,
        });
    }

    Ok(Trip {
        id: doc.id.clone(),
        title: f.required_str("title")?,
        destination: f.required_str("destination")?,
        start_location: f.optional_str("startLocation"),
        start_date,
        end_date,
        description: f.required_str("description")?,
        categories: f.categories(),
        budget: f.optional_str("budget").unwrap_or_default(),
        max_group_size,
        current_member_count,
        image_urls: f.string_list("imageUrls"),
        data_ai_hint: f.optional_str("dataAiHint").unwrap_or_default(),
        created_by_id,
        creator_name: f
            .optional_str("creatorName")
            .unwrap_or_else(|| UNKNOWN_CREATOR.to_string()),
        creator_avatar_url: f.optional_str("creatorAvatarUrl"),
        smoking_policy: f.policy("smokingPolicy"),
        alcohol_policy: f.policy("alcoholPolicy"),
        gender_preference: f.policy("genderPreference"),
        target_age_group: f.policy("targetAgeGroup"),
        target_traveler_type: f.policy("targetTravelerType"),
        created_at: f.optional_timestamp("createdAt").unwrap_or(now),
        updated_at: f.optional_timestamp("updatedAt").unwrap_or(now),
    })
}

/// Parses the timestamp shapes the store emits: an RFC 3339 string, or an
/// object with `seconds` and `nanoseconds` (underscore-prefixed keys too).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(obj) => {
            let seconds = obj.get("seconds").or_else(|| obj.get("_seconds"))?.as_i64()?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

struct Fields<'a> {
    id: &'a str,
    map: &'a Map<String, Value>,
}

impl Fields<'_> {
    /// Absent and explicit null are the same thing to the store.
    fn get(&self, field: &str) -> Option<&Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    fn required_str(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.get(field) {
            None => Err(DecodeError::MissingField(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(invalid(field, format!("expected a string, found {other}"))),
        }
    }

    fn optional_str(&self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) | None => None,
            Some(other) => {
                log::debug!("trip {}: ignoring non-string '{}': {}", self.id, field, other);
                None
            }
        }
    }

    fn required_timestamp(&self, field: &'static str) -> Result<DateTime<Utc>, DecodeError> {
        let value = self.get(field).ok_or(DecodeError::MissingField(field))?;
        parse_timestamp(value).ok_or_else(|| invalid(field, format!("not a timestamp: {value}")))
    }

    fn optional_timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        let value = self.get(field)?;
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            log::debug!("trip {}: ignoring malformed '{}': {}", self.id, field, value);
        }
        parsed
    }

    fn required_count(&self, field: &'static str) -> Result<u32, DecodeError> {
        self.optional_count(field)?.ok_or(DecodeError::MissingField(field))
    }

    fn optional_count(&self, field: &'static str) -> Result<Option<u32>, DecodeError> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };
        as_count(value)
            .map(Some)
            .ok_or_else(|| invalid(field, format!("expected a non-negative integer, found {value}")))
    }

    fn string_list(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn categories(&self) -> Vec<String> {
        self.string_list("categories")
            .into_iter()
            .filter(|c| {
                let known = find_category(c).is_some();
                if !known {
                    log::debug!("trip {}: dropping unknown category '{}'", self.id, c);
                }
                known
            })
            .collect()
    }

    fn policy<T: FromStr + Default>(&self, field: &str) -> T {
        match self.get(field).and_then(Value::as_str) {
            Some(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
                log::debug!("trip {}: unknown {} '{}', using 'any'", self.id, field, raw);
                T::default()
            }),
            _ => T::default(),
        }
    }
}

fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}

fn invalid(field: &'static str, reason: String) -> DecodeError {
    DecodeError::InvalidField { field, reason }
}
