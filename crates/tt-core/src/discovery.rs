//! # Discovery
//!
//! Merging the sample dataset with live records, and narrowing the merged
//! list down to what the discover surface shows.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::Trip;

/// Merges seed trips with live ones. A live trip replaces any seed trip with
/// the same id; otherwise seed order comes first, then live arrival order.
pub fn reconcile(seed: &[Trip], live: &[Trip]) -> Vec<Trip> {
    let live_ids: HashSet<&str> = live.iter().map(|t| t.id.as_str()).collect();

    seed.iter()
        .filter(|t| !live_ids.contains(t.id.as_str()))
        .chain(live.iter())
        .cloned()
        .collect()
}

/// True when `query` is empty or found, case-insensitively, in the title or
/// destination.
pub fn matches_text(trip: &Trip, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    trip.title.to_lowercase().contains(&needle) || trip.destination.to_lowercase().contains(&needle)
}

pub fn matches_category(trip: &Trip, category: Option<&str>) -> bool {
    category.map_or(true, |c| trip.has_category(c))
}

/// The visible subset, in input order.
pub fn filter<'a>(trips: &'a [Trip], query: &str, category: Option<&str>) -> Vec<&'a Trip> {
    trips
        .iter()
        .filter(|t| matches_text(t, query) && matches_category(t, category))
        .collect()
}

pub const DEFAULT_HEADING: &str = "Recommended Trips";

/// Search box and category bar state of the discover surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFilter {
    #[serde(default, rename = "q")]
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl DiscoveryFilter {
    pub fn new(query: impl Into<String>, category: Option<String>) -> Self {
        Self {
            query: query.into(),
            category: category.filter(|c| !c.is_empty()),
        }
    }

    /// Selecting the current category clears it.
    pub fn toggle_category(&mut self, id: &str) {
        if self.category.as_deref() == Some(id) {
            self.category = None;
        } else {
            self.category = Some(id.to_string());
        }
    }

    /// The filter that clicking `id` in the category bar would produce.
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.toggle_category(id);
        next
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.category = None;
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.category.is_some()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.category.as_deref() == Some(id)
    }

    pub fn heading(&self) -> String {
        match &self.category {
            Some(c) => format!("{c} Trips"),
            None => DEFAULT_HEADING.to_string(),
        }
    }

    pub fn apply<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        filter(trips, &self.query, self.category.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_trips;
    use chrono::Utc;

    fn ids(trips: &[&Trip]) -> Vec<String> {
        trips.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn empty_live_leaves_seed_untouched() {
        let seed = seed_trips(Utc::now());
        assert_eq!(reconcile(&seed, &[]), seed);
    }

    #[test]
    fn live_trip_wins_on_shared_id() {
        let seed = seed_trips(Utc::now());
        let mut live = seed[0].clone();
        live.title = "Maldives, Revisited".into();

        let merged = reconcile(&seed, std::slice::from_ref(&live));
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.last(), Some(&live));
        assert_eq!(merged.iter().filter(|t| t.id == "1").count(), 1);
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let seed = seed_trips(Utc::now());
        assert_eq!(ids(&filter(&seed, "PARIS", None)), vec!["3"]);
        assert_eq!(ids(&filter(&seed, "lights hu", None)), vec!["2"]);
        assert_eq!(ids(&filter(&seed, "france", None)), vec!["3"]);
        assert!(filter(&seed, "tokyo", None).is_empty());
    }

    #[test]
    fn both_predicates_must_hold() {
        let seed = seed_trips(Utc::now());
        assert_eq!(ids(&filter(&seed, "getaway", None)), vec!["1", "3"]);
        assert_eq!(ids(&filter(&seed, "getaway", Some("Foodie"))), vec!["3"]);
        assert!(filter(&seed, "iceland", Some("Beach")).is_empty());
    }

    #[test]
    fn category_match_is_exact() {
        let seed = seed_trips(Utc::now());
        assert!(filter(&seed, "", Some("beach")).is_empty());
        assert!(filter(&seed, "", Some("Ice")).is_empty());
    }

    #[test]
    fn toggling_the_selected_category_clears_it() {
        let mut f = DiscoveryFilter::default();
        f.toggle_category("Beach");
        assert_eq!(f.category.as_deref(), Some("Beach"));
        assert_eq!(f.heading(), "Beach Trips");
        f.toggle_category("Wellness");
        assert_eq!(f.category.as_deref(), Some("Wellness"));
        f.toggle_category("Wellness");
        assert_eq!(f.category, None);
        assert_eq!(f.heading(), DEFAULT_HEADING);
    }

    #[test]
    fn reset_clears_everything() {
        let mut f = DiscoveryFilter::new("paris", Some("Cultural".into()));
        assert!(f.is_active());
        f.reset();
        assert!(!f.is_active());
        assert_eq!(f, DiscoveryFilter::default());
    }

    #[test]
    fn empty_category_string_means_no_filter() {
        let f = DiscoveryFilter::new("", Some(String::new()));
        assert_eq!(f.category, None);
    }
}
