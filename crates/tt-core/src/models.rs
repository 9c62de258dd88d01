//! # Domain Models
//!
//! These structs represent the core entities of TripTogether.
//! Identifiers are opaque strings assigned by the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    AgeGroup, AlcoholPolicy, GenderPreference, SmokingPolicy, TravelerType,
    UserAlcoholPreference, UserSmokingPreference,
};

/// A travel proposal other users can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub destination: String,
    /// Where the group meets up
    pub start_location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub description: String,
    /// Category ids from `catalog::CATEGORIES`
    pub categories: Vec<String>,
    /// Free text, e.g. "$1000 - $1500"
    pub budget: String,
    pub max_group_size: u32,
    pub current_member_count: u32,
    pub image_urls: Vec<String>,
    pub data_ai_hint: String,
    pub created_by_id: String,
    /// Denormalized from the creator's profile
    pub creator_name: String,
    pub creator_avatar_url: Option<String>,

    pub smoking_policy: SmokingPolicy,
    pub alcohol_policy: AlcoholPolicy,
    pub gender_preference: GenderPreference,
    pub target_age_group: AgeGroup,
    pub target_traveler_type: TravelerType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c == id)
    }

    pub fn open_spots(&self) -> u32 {
        self.max_group_size.saturating_sub(self.current_member_count)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Length of the trip in whole days, counting both ends.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// An account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Never leaves the backend
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// e.g. "Andes Trek (Adventure, Mountains)"
    #[serde(default)]
    pub travel_history: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,

    #[serde(default)]
    pub smoking_policy: UserSmokingPreference,
    #[serde(default)]
    pub alcohol_policy: UserAlcoholPreference,
    #[serde(default)]
    pub preferred_gender_mix: GenderPreference,
    #[serde(default)]
    pub preferred_age_group: AgeGroup,
    #[serde(default)]
    pub preferred_traveler_type: TravelerType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A message in a trip's group chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub group_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_avatar_url: Option<String>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A document as returned by the store: its id plus untyped fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}
