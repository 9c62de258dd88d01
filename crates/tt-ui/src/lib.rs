//! # tt-ui
//!
//! Askama views for the discover surface and the site header.

use askama::Template;
use tt_core::catalog::CATEGORIES;
use tt_core::discovery::DiscoveryFilter;
use tt_core::session::SessionState;
use tt_core::Trip;

pub const EMPTY_RESULTS_MESSAGE: &str = "No trips match your current search or filters.";

pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    /// Rendered as a POST form button instead of a link
    pub is_action: bool,
}

/// Header navigation for one session state.
pub struct HeaderView {
    pub nav: Vec<NavLink>,
}

impl HeaderView {
    pub fn for_state(state: SessionState) -> Self {
        Self {
            nav: state
                .nav_items()
                .iter()
                .map(|item| NavLink {
                    label: item.label(),
                    href: item.href(),
                    is_action: item.is_action(),
                })
                .collect(),
        }
    }
}

pub struct CategoryChip {
    pub id: &'static str,
    pub name: &'static str,
    /// Link that toggles this category against the current filter
    pub href: String,
    pub selected: bool,
}

/// Builds `/discover` with the filter as query string.
pub fn discover_href(filter: &DiscoveryFilter) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !filter.query.is_empty() {
        query.append_pair("q", &filter.query);
    }
    if let Some(category) = &filter.category {
        query.append_pair("category", category);
    }
    let encoded = query.finish();
    if encoded.is_empty() {
        "/discover".to_string()
    } else {
        format!("/discover?{encoded}")
    }
}

pub fn category_chips(filter: &DiscoveryFilter) -> Vec<CategoryChip> {
    CATEGORIES
        .iter()
        .map(|c| CategoryChip {
            id: c.id,
            name: c.name,
            href: discover_href(&filter.toggled(c.id)),
            selected: filter.is_selected(c.id),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "discover.html")]
pub struct DiscoverTemplate<'a> {
    pub header: HeaderView,
    pub show_profile_banner: bool,
    pub query: &'a str,
    pub heading: String,
    pub filters_active: bool,
    /// Same page with search and category cleared
    pub clear_href: String,
    pub categories: Vec<CategoryChip>,
    pub trips: Vec<&'a Trip>,
    pub empty_message: &'static str,
}

impl<'a> DiscoverTemplate<'a> {
    pub fn new(state: SessionState, filter: &'a DiscoveryFilter, trips: Vec<&'a Trip>) -> Self {
        let mut cleared = filter.clone();
        cleared.reset();
        Self {
            header: HeaderView::for_state(state),
            show_profile_banner: state.shows_profile_banner(),
            query: &filter.query,
            heading: filter.heading(),
            filters_active: filter.is_active(),
            clear_href: discover_href(&cleared),
            categories: category_chips(filter),
            trips,
            empty_message: EMPTY_RESULTS_MESSAGE,
        }
    }
}

/// Full-page notice used while loading and when loading failed.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    pub header: HeaderView,
    pub title: &'static str,
    pub message: String,
    pub is_error: bool,
}

impl NoticeTemplate {
    pub fn loading(state: SessionState) -> Self {
        Self {
            header: HeaderView::for_state(state),
            title: "Loading trips...",
            message: String::new(),
            is_error: false,
        }
    }

    pub fn error(state: SessionState, message: impl Into<String>) -> Self {
        Self {
            header: HeaderView::for_state(state),
            title: "Error",
            message: message.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tt_core::seed::seed_trips;

    #[test]
    fn chip_links_toggle_the_category() {
        let filter = DiscoveryFilter::new("", Some("Beach".into()));
        let chips = category_chips(&filter);
        let beach = chips.iter().find(|c| c.id == "Beach").unwrap();
        assert!(beach.selected);
        assert_eq!(beach.href, "/discover");

        let snow = chips.iter().find(|c| c.id == "Ice & Snow").unwrap();
        assert!(!snow.selected);
        assert_eq!(snow.href, "/discover?category=Ice+%26+Snow");
    }

    #[test]
    fn href_keeps_the_query() {
        let filter = DiscoveryFilter::new("new york", None);
        assert_eq!(discover_href(&filter.toggled("Foodie")), "/discover?q=new+york&category=Foodie");
    }

    #[test]
    fn onboarding_page_shows_banner_and_restricted_nav() {
        let trips = seed_trips(Utc::now());
        let filter = DiscoveryFilter::default();
        let html = DiscoverTemplate::new(SessionState::Onboarding, &filter, trips.iter().collect())
            .render()
            .unwrap();
        assert!(html.contains("Complete Your Profile!"));
        assert!(html.contains("Complete Profile"));
        assert!(!html.contains("Create Trip"));
        assert!(html.contains("Recommended Trips"));
        assert!(html.contains("Northern Lights Hunt"));
    }

    #[test]
    fn trip_cards_show_length_and_open_spots() {
        let trips = seed_trips(Utc::now());
        let filter = DiscoveryFilter::new("iceland", None);
        let html = DiscoverTemplate::new(SessionState::Active, &filter, filter.apply(&trips))
            .render()
            .unwrap();
        let trip = &trips[1];
        assert!(html.contains(&format!("{} days", trip.duration_days())));
        assert!(html.contains(&format!("{} spots left", trip.open_spots())));
        assert!(html.contains(r#"href="/discover" class="reset""#));
    }

    #[test]
    fn empty_result_explains_itself() {
        let filter = DiscoveryFilter::new("atlantis", None);
        let html = DiscoverTemplate::new(SessionState::Active, &filter, Vec::new())
            .render()
            .unwrap();
        assert!(html.contains(EMPTY_RESULTS_MESSAGE));
        assert!(html.contains("Clear Filters"));
        assert!(!html.contains("Complete Your Profile!"));
    }

    #[test]
    fn anonymous_header_offers_sign_in() {
        let html = NoticeTemplate::error(SessionState::Anonymous, "Failed to fetch trips.")
            .render()
            .unwrap();
        assert!(html.contains("/auth/sign-in"));
        assert!(html.contains("Sign Up"));
        assert!(!html.contains("Sign Out"));
        assert!(html.contains("Failed to fetch trips."));
    }
}
