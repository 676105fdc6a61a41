//! Pure aggregation helpers over in-memory record sequences.
//!
//! Every function here is deterministic, side-effect-free and recomputed per
//! call; nothing is cached. The counting helpers return unordered label to
//! count mappings with no tie-break; consumers sort only for display. Each
//! helper buckets every input record exactly once, so the sum of the counts
//! always equals the number of records considered.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Days, Utc};

use crate::models::{CategoryCount, Record, Sentiment, TrendPoint};

/// Area bucket used for records that carry no location.
pub const UNSPECIFIED_AREA: &str = "unspecified";

/// Record count per category label.
pub fn count_by_category(records: &[Record]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.category.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Record count per sentiment label.
pub fn count_by_sentiment(records: &[Record]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.sentiment.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Record count per source platform label.
pub fn count_by_platform(records: &[Record]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.source.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Record count per area name. Records without a location fall into the
/// [`UNSPECIFIED_AREA`] bucket so the total still matches the input size.
pub fn count_by_area(records: &[Record]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in records {
        let area = record
            .location
            .as_ref()
            .map(|l| l.area.clone())
            .unwrap_or_else(|| UNSPECIFIED_AREA.to_string());
        *counts.entry(area).or_insert(0) += 1;
    }
    counts
}

/// Category breakdown shaped for the category charts: capitalized labels,
/// alphabetical order.
pub fn category_slices(records: &[Record]) -> Vec<CategoryCount> {
    let mut ordered: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *ordered.entry(record.category.to_string()).or_insert(0) += 1;
    }
    ordered
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: capitalize(&label),
            count,
        })
        .collect()
}

/// Platform breakdown with display-cased labels, the documented local
/// fallback when [`crate::models::PlatformCounts::Unavailable`] is observed.
pub fn platform_counts(records: &[Record]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.source.display_name().to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Sentiment trend over the trailing `days` window ending now.
pub fn sentiment_trend(records: &[Record], days: u64) -> Vec<TrendPoint> {
    sentiment_trend_until(records, days, Utc::now())
}

/// Sentiment trend over the trailing `days` window ending at `end`.
///
/// Produces one point per calendar day from `end - days` through `end`
/// inclusive, labelled `"Apr 10"` style. Exposed separately from
/// [`sentiment_trend`] so the window end can be pinned.
pub fn sentiment_trend_until(records: &[Record], days: u64, end: DateTime<Utc>) -> Vec<TrendPoint> {
    let end_day = end.date_naive();
    let start_day = end_day
        .checked_sub_days(Days::new(days))
        .unwrap_or(end_day);

    let mut points = Vec::new();
    let mut day = start_day;
    loop {
        let mut point = TrendPoint {
            label: day.format("%b %-d").to_string(),
            positive: 0,
            neutral: 0,
            negative: 0,
        };
        for record in records {
            if record.timestamp.date_naive() == day {
                match record.sentiment {
                    Sentiment::Positive => point.positive += 1,
                    Sentiment::Neutral => point.neutral += 1,
                    Sentiment::Negative => point.negative += 1,
                }
            }
        }
        points.push(point);

        if day >= end_day {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    points
}

/// The `limit` records with the highest upvote counts, descending. Records
/// without an upvote count rank as zero.
pub fn trending(records: &[Record], limit: usize) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.upvotes.unwrap_or(0).cmp(&a.upvotes.unwrap_or(0)));
    sorted.truncate(limit);
    sorted
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Location, Platform, Sentiment};
    use crate::samples;
    use chrono::TimeZone;

    fn record_without_location() -> Record {
        Record {
            id: "x".to_string(),
            source: Platform::Direct,
            content: "No location attached".to_string(),
            category: Category::Other,
            sentiment: Sentiment::Neutral,
            timestamp: Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap(),
            location: None,
            upvotes: None,
        }
    }

    #[test]
    fn every_helper_preserves_the_record_total() {
        let mut records = samples::grievances();
        records.extend(samples::social_posts());
        records.push(record_without_location());
        let total = records.len() as u64;

        assert_eq!(count_by_category(&records).values().sum::<u64>(), total);
        assert_eq!(count_by_sentiment(&records).values().sum::<u64>(), total);
        assert_eq!(count_by_platform(&records).values().sum::<u64>(), total);
        assert_eq!(count_by_area(&records).values().sum::<u64>(), total);
    }

    #[test]
    fn missing_locations_bucket_as_unspecified() {
        let records = vec![record_without_location()];
        let counts = count_by_area(&records);
        assert_eq!(counts.get(UNSPECIFIED_AREA), Some(&1));
    }

    #[test]
    fn grievance_counts_match_the_seeded_data() {
        let records = samples::grievances();
        let by_category = count_by_category(&records);
        assert_eq!(by_category.get("infrastructure"), Some(&3));
        assert_eq!(by_category.get("transportation"), Some(&2));
        assert_eq!(by_category.get("waste"), Some(&1));
        assert_eq!(by_category.get("noise"), Some(&1));
        assert_eq!(by_category.get("safety"), Some(&1));

        let by_sentiment = count_by_sentiment(&records);
        assert_eq!(by_sentiment.get("negative"), Some(&6));
        assert_eq!(by_sentiment.get("positive"), Some(&2));
        assert_eq!(by_sentiment.get("neutral"), None);
    }

    #[test]
    fn category_slices_are_capitalized() {
        let slices = category_slices(&samples::grievances());
        assert!(slices.iter().any(|s| s.label == "Infrastructure"));
        assert!(slices.iter().all(|s| {
            s.label
                .chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
        }));
        let total: u64 = slices.iter().map(|s| s.count).sum();
        assert_eq!(total, samples::grievances().len() as u64);
    }

    #[test]
    fn platform_counts_use_display_names() {
        let counts = platform_counts(&samples::social_posts());
        assert_eq!(counts.get("Twitter"), Some(&7));
        assert_eq!(counts.get("Facebook"), Some(&7));
    }

    #[test]
    fn trend_buckets_by_calendar_day() {
        let records = samples::social_posts();
        let end = Utc.with_ymd_and_hms(2025, 4, 10, 23, 0, 0).unwrap();
        let points = sentiment_trend_until(&records, 7, end);

        // One point per day, window end inclusive.
        assert_eq!(points.len(), 8);
        assert_eq!(points[0].label, "Apr 3");
        assert_eq!(points[7].label, "Apr 10");

        // Apr 10 holds exactly the metro post (positive).
        assert_eq!(points[7].positive, 1);
        assert_eq!(points[7].neutral, 0);
        assert_eq!(points[7].negative, 0);

        // Posts older than the window are not counted anywhere.
        let counted: u64 = points
            .iter()
            .map(|p| p.positive + p.neutral + p.negative)
            .sum();
        assert_eq!(counted, 8);
    }

    #[test]
    fn trending_ranks_by_upvotes() {
        let top = trending(&samples::grievances(), 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].upvotes, Some(42));
        assert_eq!(top[1].upvotes, Some(32));
        for pair in top.windows(2) {
            assert!(pair[0].upvotes.unwrap_or(0) >= pair[1].upvotes.unwrap_or(0));
        }
    }
}
