//! Compiled-in sample data.
//!
//! These records are the fallback dataset the fetch client substitutes when
//! the upstream API is unreachable, so the dashboard never renders empty
//! primary views. Two seeded sets exist: directly filed grievances and
//! collected social-media posts.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Category, Location, Platform, Record, Sentiment};

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid sample timestamp")
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    source: Platform,
    content: &str,
    category: Category,
    sentiment: Sentiment,
    timestamp: DateTime<Utc>,
    location: Option<Location>,
    upvotes: Option<u32>,
) -> Record {
    Record {
        id: id.to_string(),
        source,
        content: content.to_string(),
        category,
        sentiment,
        timestamp,
        location,
        upvotes,
    }
}

/// Seeded citizen grievances, with full geolocation and upvote counts.
pub fn grievances() -> Vec<Record> {
    vec![
        record(
            "1",
            Platform::Twitter,
            "The potholes on Anna Salai are getting ridiculous! My car almost got damaged this morning. @ChennaiCorp do something!",
            Category::Infrastructure,
            Sentiment::Negative,
            ts(2025, 4, 10, 8, 23, 15),
            Some(Location::point(13.0622, 80.2356, "Chennai Central")),
            Some(32),
        ),
        record(
            "2",
            Platform::Facebook,
            "Trash collection has been inconsistent in Adyar. Bins have been overflowing for days!",
            Category::Waste,
            Sentiment::Negative,
            ts(2025, 4, 10, 12, 10, 22),
            Some(Location::point(13.0053, 80.2510, "Adyar")),
            Some(15),
        ),
        record(
            "3",
            Platform::Twitter,
            "The new traffic signals installed in Coimbatore have really improved the flow of traffic. Good job @CoimbatoreCorp",
            Category::Transportation,
            Sentiment::Positive,
            ts(2025, 4, 9, 15, 45, 30),
            Some(Location::point(11.0168, 76.9558, "Coimbatore")),
            Some(8),
        ),
        record(
            "4",
            Platform::Twitter,
            "Construction noise at night in T Nagar is unbearable. How are we supposed to sleep?",
            Category::Noise,
            Sentiment::Negative,
            ts(2025, 4, 9, 22, 17, 8),
            Some(Location::point(13.0418, 80.2341, "T Nagar")),
            Some(27),
        ),
        record(
            "5",
            Platform::Direct,
            "Street lights out on Kamarajar Salai for over a week now. It feels unsafe to walk at night.",
            Category::Safety,
            Sentiment::Negative,
            ts(2025, 4, 8, 19, 30, 45),
            Some(Location::point(13.0658, 80.2778, "Marina Beach")),
            Some(42),
        ),
        record(
            "6",
            Platform::Facebook,
            "Public park benches in Madurai are in desperate need of repair. Several are broken and unusable.",
            Category::Infrastructure,
            Sentiment::Negative,
            ts(2025, 4, 8, 14, 12, 33),
            Some(Location::point(9.9252, 78.1198, "Madurai")),
            Some(11),
        ),
        record(
            "7",
            Platform::Twitter,
            "Bus #42 from Trichy to Thanjavur is consistently late. Commuting has become a nightmare.",
            Category::Transportation,
            Sentiment::Negative,
            ts(2025, 4, 7, 8, 5, 17),
            Some(Location::point(10.7905, 78.7047, "Trichy")),
            Some(19),
        ),
        record(
            "8",
            Platform::Direct,
            "Thank you for fixing the water supply issues in Salem so quickly after reports!",
            Category::Infrastructure,
            Sentiment::Positive,
            ts(2025, 4, 7, 16, 40, 22),
            Some(Location::point(11.6643, 78.1460, "Salem")),
            Some(5),
        ),
    ]
}

/// Seeded social-media posts, as collected from the monitored platforms.
/// Locations are area names only; machine-assigned niche categories fold
/// into [`Category::Other`].
pub fn social_posts() -> Vec<Record> {
    vec![
        record(
            "101",
            Platform::Twitter,
            "The new metro extension in Chennai is making my commute so much easier! #ChennaiMetro",
            Category::Transportation,
            Sentiment::Positive,
            ts(2025, 4, 10, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "102",
            Platform::Facebook,
            "Garbage not collected in Adyar for the third day in a row. @ChennaiCorp please look into this matter urgently.",
            Category::Waste,
            Sentiment::Negative,
            ts(2025, 4, 9, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "103",
            Platform::Twitter,
            "Beautiful new park opened in T. Nagar today! A much-needed green space in the city. #ChennaiCity",
            Category::Other,
            Sentiment::Positive,
            ts(2025, 4, 8, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "104",
            Platform::Facebook,
            "Traffic at Kathipara junction is terrible today due to ongoing construction. Plan accordingly.",
            Category::Other,
            Sentiment::Negative,
            ts(2025, 4, 7, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "105",
            Platform::Twitter,
            "Water supply interrupted in Velachery since morning. No information about when it will be restored.",
            Category::Water,
            Sentiment::Negative,
            ts(2025, 4, 6, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "106",
            Platform::Facebook,
            "The Coimbatore Smart City initiatives are really improving the quality of life here. Great work!",
            Category::Infrastructure,
            Sentiment::Positive,
            ts(2025, 4, 5, 0, 0, 0),
            Some(Location::area_only("Coimbatore")),
            None,
        ),
        record(
            "107",
            Platform::Twitter,
            "Schools in Madurai closed tomorrow due to heavy rain forecast. Stay safe everyone!",
            Category::Other,
            Sentiment::Neutral,
            ts(2025, 4, 4, 0, 0, 0),
            Some(Location::area_only("Madurai")),
            None,
        ),
        record(
            "108",
            Platform::Facebook,
            "Trichy Corporation has fixed all the potholes on East Boulevard Road. Finally a smooth ride!",
            Category::Other,
            Sentiment::Positive,
            ts(2025, 4, 3, 0, 0, 0),
            Some(Location::area_only("Trichy")),
            None,
        ),
        record(
            "109",
            Platform::Twitter,
            "New bus routes announced for Salem city. Will help connect more rural areas to the city center.",
            Category::Transportation,
            Sentiment::Positive,
            ts(2025, 4, 2, 0, 0, 0),
            Some(Location::area_only("Salem")),
            None,
        ),
        record(
            "110",
            Platform::Facebook,
            "The streetlights in my neighborhood haven't been working for weeks now. Feeling unsafe at night.",
            Category::Safety,
            Sentiment::Negative,
            ts(2025, 4, 1, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "111",
            Platform::Twitter,
            "Hospital wait times are outrageous in Chennai GH. Waited 4 hours and still haven't seen a doctor.",
            Category::Other,
            Sentiment::Negative,
            ts(2025, 3, 30, 0, 0, 0),
            Some(Location::area_only("Chennai")),
            None,
        ),
        record(
            "112",
            Platform::Facebook,
            "The new public library in Coimbatore is amazing! So many resources and a beautiful space.",
            Category::Other,
            Sentiment::Positive,
            ts(2025, 3, 29, 0, 0, 0),
            Some(Location::area_only("Coimbatore")),
            None,
        ),
        record(
            "113",
            Platform::Twitter,
            "Just voted at my local polling station in Madurai. The process was organized and quick!",
            Category::Other,
            Sentiment::Positive,
            ts(2025, 3, 28, 0, 0, 0),
            Some(Location::area_only("Madurai")),
            None,
        ),
        record(
            "114",
            Platform::Facebook,
            "Trichy airport needs more flight connections to major cities. Current options are limited.",
            Category::Transportation,
            Sentiment::Negative,
            ts(2025, 3, 27, 0, 0, 0),
            Some(Location::area_only("Trichy")),
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sets_have_expected_sizes() {
        assert_eq!(grievances().len(), 8);
        assert_eq!(social_posts().len(), 14);
    }

    #[test]
    fn seeded_ids_are_unique_across_sets() {
        let mut ids: Vec<String> = grievances()
            .into_iter()
            .chain(social_posts())
            .map(|r| r.id)
            .collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
