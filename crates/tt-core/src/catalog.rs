//! # Controlled Vocabularies
//!
//! The fixed option sets shared by trips, user profiles, and the filter UI.
//! Every set carries a wildcard `any` except the category list, whose
//! membership is plain exact string match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value that is not part of the named vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {vocabulary}")]
pub struct UnknownValue {
    pub vocabulary: &'static str,
    pub value: String,
}

/// A (value, label) pair as rendered by select inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $display:literal {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire value as stored in documents.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn options() -> Vec<OptionEntry> {
                Self::ALL
                    .iter()
                    .map(|v| OptionEntry { value: v.as_str(), label: v.label() })
                    .collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Any
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    other => Err(UnknownValue {
                        vocabulary: $display,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Smoking rule set by a trip's creator.
    SmokingPolicy, "smoking policy" {
        Any => ("any", "Any Smoking Policy"),
        NotPermitted => ("not_permitted", "Smoking Not Permitted"),
        Permitted => ("permitted", "Smoking Permitted"),
        OutsideOnly => ("outside_only", "Smoking Outside Only"),
    }
}

vocabulary! {
    /// A user's own stance on smoking in a group.
    UserSmokingPreference, "smoking preference" {
        Any => ("any", "Flexible / No Preference"),
        NonSmoker => ("non_smoker", "Prefer Non-Smoking Groups"),
        SmokerFriendly => ("smoker_friendly", "Smoker-Friendly Groups Ok"),
        FlexibleSmoking => ("flexible_smoking", "Flexible on Smoking"),
    }
}

vocabulary! {
    /// Alcohol rule set by a trip's creator.
    AlcoholPolicy, "alcohol policy" {
        Any => ("any", "Any Alcohol Policy"),
        NotPermitted => ("not_permitted", "Alcohol Not Permitted (Dry Trip)"),
        Socially => ("socially", "Alcohol Socially / Moderately"),
        Permitted => ("permitted", "Alcohol Permitted / Party Friendly"),
    }
}

vocabulary! {
    /// A user's own stance on alcohol in a group.
    UserAlcoholPreference, "alcohol preference" {
        Any => ("any", "Flexible / No Preference"),
        DryTrip => ("dry_trip", "Prefer Dry Trips"),
        SocialDrinker => ("social_drinker", "Social/Moderate Drinker"),
        PartyFriendly => ("party_friendly", "Party Friendly Groups Ok"),
    }
}

vocabulary! {
    GenderPreference, "gender preference" {
        Any => ("any", "Any Gender Mix"),
        Mixed => ("mixed", "Mixed Group (All Genders)"),
        MenOnly => ("men_only", "Men Only"),
        WomenOnly => ("women_only", "Women Only"),
    }
}

vocabulary! {
    AgeGroup, "age group" {
        Any => ("any", "Any Age Group"),
        From18To25 => ("18-25", "18-25 years"),
        From26To35 => ("26-35", "26-35 years"),
        From36To45 => ("36-45", "36-45 years"),
        Over45 => ("45+", "45+ years"),
    }
}

vocabulary! {
    TravelerType, "traveler type" {
        Any => ("any", "Any Traveler Type"),
        Singles => ("singles", "Singles"),
        Couples => ("couples", "Couples"),
        Family => ("family", "Family Friendly"),
        Friends => ("friends", "Friends Group"),
        Backpackers => ("backpackers", "Backpackers"),
        Luxury => ("luxury", "Luxury Travelers"),
    }
}

/// A theme tag a trip can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Keywords for picking a stock image when a trip has none.
    pub data_ai_hint: &'static str,
}

const fn category(id: &'static str, name: &'static str, data_ai_hint: &'static str) -> Category {
    Category { id, name, data_ai_hint }
}

pub const CATEGORIES: [Category; 15] = [
    category("Mountains", "Mountains", "mountains landscape"),
    category("Beach", "Beach", "beach sunset"),
    category("Desert", "Desert", "desert dunes"),
    category("Hill Stations", "Hill Stations", "hill station"),
    category("Ice & Snow", "Ice & Snow", "snowy landscape"),
    category("Historical", "Historical", "historical ruins"),
    category("Cultural", "Cultural", "cultural festival"),
    category("City Break", "City Break", "city skyline"),
    category("Adventure", "Adventure", "adventure sport"),
    category("Road Trip", "Road Trip", "road trip scenic"),
    category("Wildlife", "Wildlife", "wildlife safari"),
    category("Wellness", "Wellness", "yoga retreat"),
    category("Foodie", "Foodie", "gourmet food"),
    category("Nightlife", "Nightlife", "city nightlife"),
    category("Budget", "Budget Travel", "hostel backpacker"),
];

/// Looks up a category by exact id.
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Every vocabulary in one serializable bundle, for form and filter UIs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabularies {
    pub smoking_policy: Vec<OptionEntry>,
    pub user_smoking_preference: Vec<OptionEntry>,
    pub alcohol_policy: Vec<OptionEntry>,
    pub user_alcohol_preference: Vec<OptionEntry>,
    pub gender_preference: Vec<OptionEntry>,
    pub age_group: Vec<OptionEntry>,
    pub traveler_type: Vec<OptionEntry>,
    pub categories: &'static [Category],
}

pub fn vocabularies() -> Vocabularies {
    Vocabularies {
        smoking_policy: SmokingPolicy::options(),
        user_smoking_preference: UserSmokingPreference::options(),
        alcohol_policy: AlcoholPolicy::options(),
        user_alcohol_preference: UserAlcoholPreference::options(),
        gender_preference: GenderPreference::options(),
        age_group: AgeGroup::options(),
        traveler_type: TravelerType::options(),
        categories: &CATEGORIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_sizes_match_the_option_lists() {
        assert_eq!(SmokingPolicy::ALL.len(), 4);
        assert_eq!(AlcoholPolicy::ALL.len(), 4);
        assert_eq!(GenderPreference::ALL.len(), 4);
        assert_eq!(AgeGroup::ALL.len(), 5);
        assert_eq!(TravelerType::ALL.len(), 7);
        assert_eq!(CATEGORIES.len(), 15);
    }

    #[test]
    fn wire_values_parse_back() {
        assert_eq!("45+".parse::<AgeGroup>(), Ok(AgeGroup::Over45));
        assert_eq!("outside_only".parse::<SmokingPolicy>(), Ok(SmokingPolicy::OutsideOnly));
        let err = "couples".parse::<GenderPreference>().unwrap_err();
        assert_eq!(err.vocabulary, "gender preference");
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&AgeGroup::From26To35).unwrap();
        assert_eq!(json, "\"26-35\"");
        let back: TravelerType = serde_json::from_str("\"backpackers\"").unwrap();
        assert_eq!(back, TravelerType::Backpackers);
    }

    #[test]
    fn category_lookup_is_exact() {
        assert_eq!(find_category("Budget").map(|c| c.name), Some("Budget Travel"));
        assert!(find_category("beach").is_none());
        assert!(find_category("Budget Travel").is_none());
    }
}
