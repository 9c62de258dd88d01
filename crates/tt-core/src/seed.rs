//! Built-in sample trips shown alongside whatever the store returns.

use chrono::{DateTime, TimeZone, Utc};

use crate::catalog::{AgeGroup, AlcoholPolicy, GenderPreference, SmokingPolicy, TravelerType};
use crate::models::Trip;

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The sample dataset. `now` stamps the bookkeeping fields.
pub fn seed_trips(now: DateTime<Utc>) -> Vec<Trip> {
    vec![
        Trip {
            id: "1".into(),
            title: "Tropical Beach Getaway".into(),
            destination: "Maldives".into(),
            start_location: Some("Male International Airport (MLE)".into()),
            start_date: day(2024, 11, 15),
            end_date: day(2024, 11, 22),
            description: "Relax on pristine beaches, snorkel in crystal-clear waters, and enjoy stunning sunsets.".into(),
            categories: strings(&["Beach", "Wellness"]),
            budget: "$2500 - $3500".into(),
            max_group_size: 6,
            current_member_count: 3,
            image_urls: strings(&["https://www.beachcomber.mu/sites/default/files/styles/fullscreen_image/public/2022-01/MBL-Adult-Pool-Exterior-1920x1080.jpg?itok=o6R4eA_2"]),
            data_ai_hint: "beach tropical maldives".into(),
            created_by_id: "user1".into(),
            creator_name: "BeachLover".into(),
            creator_avatar_url: None,
            smoking_policy: SmokingPolicy::OutsideOnly,
            alcohol_policy: AlcoholPolicy::Permitted,
            gender_preference: GenderPreference::Any,
            target_age_group: AgeGroup::From26To35,
            target_traveler_type: TravelerType::Couples,
            created_at: now,
            updated_at: now,
        },
        Trip {
            id: "2".into(),
            title: "Northern Lights Hunt".into(),
            destination: "Iceland".into(),
            start_location: Some("Reykjavik City".into()),
            start_date: day(2024, 12, 1),
            end_date: day(2024, 12, 8),
            description: "Chase the magical Northern Lights, explore ice caves, and soak in geothermal pools.".into(),
            categories: strings(&["Ice & Snow", "Adventure"]),
            budget: "$3000 - $4000".into(),
            max_group_size: 8,
            current_member_count: 5,
            image_urls: strings(&["https://www.tripsavvy.com/thmb/SjXkG3Y_41tE9m73pPj-A2p_P1I=/2120x1414/filters:fill(auto,1)/Aurora-Borealis-over-water-and-mountains-565202289-588242293df78c2f7227ff95.jpg"]),
            data_ai_hint: "northern lights iceland".into(),
            created_by_id: "user2".into(),
            creator_name: "AuroraSeeker".into(),
            creator_avatar_url: None,
            smoking_policy: SmokingPolicy::NotPermitted,
            alcohol_policy: AlcoholPolicy::Socially,
            gender_preference: GenderPreference::Mixed,
            target_age_group: AgeGroup::Any,
            target_traveler_type: TravelerType::Friends,
            created_at: now,
            updated_at: now,
        },
        Trip {
            id: "3".into(),
            title: "Paris Romantic Getaway".into(),
            destination: "Paris, France".into(),
            start_location: Some("Charles de Gaulle Airport (CDG)".into()),
            start_date: day(2024, 12, 1),
            end_date: day(2024, 12, 7),
            description: "Indulge in art, cuisine, and romance in the City of Lights. Visit museums, enjoy cafes, and stroll along the Seine.".into(),
            categories: strings(&["City Break", "Cultural", "Historical", "Foodie"]),
            budget: "$1800 - $2200".into(),
            max_group_size: 4,
            current_member_count: 2,
            image_urls: strings(&["https://cdn.bhdw.net/im/eiffel-tower-paris-wallpaper-80283_w635.webp"]),
            data_ai_hint: "paris eiffel tower".into(),
            created_by_id: "user3".into(),
            creator_name: "ArtBuff".into(),
            creator_avatar_url: None,
            smoking_policy: SmokingPolicy::NotPermitted,
            alcohol_policy: AlcoholPolicy::Socially,
            gender_preference: GenderPreference::Any,
            target_age_group: AgeGroup::Any,
            target_traveler_type: TravelerType::Couples,
            created_at: now,
            updated_at: now,
        },
    ]
}
