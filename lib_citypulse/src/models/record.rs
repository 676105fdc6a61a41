//! # Feedback Record Model
//!
//! This module defines the data structures for a single piece of municipal
//! feedback: a citizen grievance or a social-media post. It provides a
//! strongly-typed representation of the JSON payloads served by the CityPulse
//! REST and push endpoints.
//!
//! ## Key Features:
//! - **Strict Data Modeling**: Uses `serde` to map the incoming JSON payload
//!   into Rust structs, ensuring data integrity at the boundary.
//! - **Flexible Wire Forms**: The upstream feeds are not uniform. Identifiers
//!   arrive as strings or numbers, timestamps as ISO-8601 strings or Unix
//!   millisecond numbers, and locations as full coordinate objects or bare
//!   area names. Custom deserializers normalize all of these into one shape.
//! - **Closed Category Set**: Categories are a fixed enumerated set matching
//!   the grievance intake form; labels outside the set decode to
//!   [`Category::Other`] instead of failing the whole record.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The platform a record originated from.
///
/// Wire form is lowercase (`"twitter"`); the social feed's capitalized
/// variants (`"Twitter"`) are accepted on input. The grievance feed calls the
/// field `source`, the social feed calls it `platform`; both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "Twitter")]
    Twitter,
    #[serde(alias = "Facebook")]
    Facebook,
    /// Submitted directly through the grievance intake form.
    #[serde(alias = "Direct")]
    Direct,
}

impl Platform {
    /// Canonical lowercase label, as serialized on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Direct => "direct",
        }
    }

    /// Capitalized label as shown in the sources panel.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Facebook => "Facebook",
            Platform::Direct => "Direct",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed set of grievance categories offered by the intake form.
///
/// Social-media posts carry a looser machine-assigned taxonomy (`parks`,
/// `roads`, ...); anything outside this set decodes to [`Category::Other`]
/// so a single stray label cannot invalidate an entire payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Infrastructure,
    Waste,
    Noise,
    Safety,
    Transportation,
    Water,
    Electricity,
    Other,
}

impl Category {
    /// Maps a wire label onto the closed set, case-insensitively.
    /// Unrecognized labels land in [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "infrastructure" => Category::Infrastructure,
            "waste" => Category::Waste,
            "noise" => Category::Noise,
            "safety" => Category::Safety,
            "transportation" => Category::Transportation,
            "water" => Category::Water,
            "electricity" => Category::Electricity,
            _ => Category::Other,
        }
    }

    /// Canonical lowercase label, as serialized on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Infrastructure => "infrastructure",
            Category::Waste => "waste",
            Category::Noise => "noise",
            Category::Safety => "safety",
            Category::Transportation => "transportation",
            Category::Water => "water",
            Category::Electricity => "electricity",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

/// Sentiment assigned to a record by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a record was reported from.
///
/// Coordinates are optional: the social feed only names an area
/// (`"location": "Chennai"`), while grievances carry the full point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub area: String,
}

impl Location {
    /// A location known only by its area name.
    pub fn area_only(area: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            area: area.into(),
        }
    }

    /// A fully resolved point with coordinates.
    pub fn point(latitude: f64, longitude: f64, area: impl Into<String>) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            area: area.into(),
        }
    }
}

/// # Feedback Record
///
/// A single grievance or social-media post. Records are immutable snapshots:
/// there is no update or delete lifecycle, they exist only as fetched or
/// seeded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier. The wire form may be a JSON string or number.
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub id: String,
    /// Originating platform. Wire field `source`, with `platform` accepted
    /// as an alias for the social feed.
    #[serde(alias = "platform")]
    pub source: Platform,
    /// Free-text content of the post or complaint.
    pub content: String,
    pub category: Category,
    pub sentiment: Sentiment,
    /// Creation time. The wire form may be an RFC 3339 string or Unix
    /// millisecond number; always serialized as RFC 3339 with millisecond
    /// precision.
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
    /// Optional geolocation; a bare area string on the wire decodes to a
    /// [`Location`] without coordinates.
    #[serde(
        default,
        deserialize_with = "deserialize_location",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Location>,
    /// Optional engagement count (upvotes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<u32>,
}

/// Accepts a JSON string or integer identifier, normalized to a string.
fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdWire {
        Text(String),
        Number(i64),
    }

    Ok(match IdWire::deserialize(deserializer)? {
        IdWire::Text(text) => text,
        IdWire::Number(number) => number.to_string(),
    })
}

/// Accepts an RFC 3339 string or a Unix millisecond number.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampWire {
        Iso(String),
        EpochMillis(i64),
    }

    match TimestampWire::deserialize(deserializer)? {
        TimestampWire::Iso(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
        TimestampWire::EpochMillis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
    }
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Accepts a coordinate object, a bare area string, or null.
fn deserialize_location<'de, D>(deserializer: D) -> Result<Option<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LocationWire {
        Point(Location),
        Area(String),
    }

    Ok(Option::<LocationWire>::deserialize(deserializer)?.map(|wire| match wire {
        LocationWire::Point(point) => point,
        LocationWire::Area(area) => Location::area_only(area),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Record {
        Record {
            id: "42".to_string(),
            source: Platform::Twitter,
            content: "The potholes on Anna Salai are getting ridiculous!".to_string(),
            category: Category::Infrastructure,
            sentiment: Sentiment::Negative,
            timestamp: Utc.with_ymd_and_hms(2025, 4, 10, 8, 23, 15).unwrap(),
            location: Some(Location::point(13.0622, 80.2356, "Chennai Central")),
            upvotes: Some(32),
        }
    }

    #[test]
    fn wire_round_trip_with_location() {
        let record = sample_record();
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: Record = serde_json::from_str(&encoded).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn wire_round_trip_without_location() {
        let record = Record {
            location: None,
            upvotes: None,
            ..sample_record()
        };
        let encoded = serde_json::to_string(&record).unwrap();
        assert!(!encoded.contains("location"));
        let decoded: Record = serde_json::from_str(&encoded).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn decodes_social_feed_shape() {
        // Numeric id, capitalized platform under the `platform` key,
        // millisecond timestamp, bare-string location.
        let decoded: Record = serde_json::from_value(json!({
            "id": 7,
            "platform": "Twitter",
            "content": "Schools in Madurai closed tomorrow due to heavy rain forecast.",
            "timestamp": 1_743_724_800_000_i64,
            "location": "Madurai",
            "sentiment": "neutral",
            "category": "education"
        }))
        .unwrap();

        assert_eq!(decoded.id, "7");
        assert_eq!(decoded.source, Platform::Twitter);
        assert_eq!(decoded.timestamp.timestamp_millis(), 1_743_724_800_000);
        assert_eq!(
            decoded.location,
            Some(Location::area_only("Madurai"))
        );
        // `education` is outside the fixed intake set.
        assert_eq!(decoded.category, Category::Other);
    }

    #[test]
    fn unknown_sentiment_is_rejected() {
        let result: Result<Record, _> = serde_json::from_value(json!({
            "id": "1",
            "source": "twitter",
            "content": "x",
            "category": "waste",
            "sentiment": "ecstatic",
            "timestamp": "2025-04-10T08:23:15.000Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn timestamp_serializes_as_rfc3339_millis() {
        let encoded = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(encoded["timestamp"], "2025-04-10T08:23:15.000Z");
    }
}
