//! Chart-facing series types returned by the REST endpoints and by the
//! local aggregation fallbacks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day-bucket of the sentiment trend series.
///
/// The wire field for the day label is `name` (e.g. `"Apr 10"`), matching
/// what the trend chart consumes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "name")]
    pub label: String,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// One slice of the category breakdown, shaped as the `{name, value}` pair
/// the category charts consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "value")]
    pub count: u64,
}

/// Result of the platform-breakdown fetch.
///
/// Unlike the other dataset operations, a failed platform fetch is NOT
/// substituted with sample data: callers receive the explicit
/// [`PlatformCounts::Unavailable`] sentinel and are expected to derive
/// counts locally (see [`crate::aggregate::platform_counts`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCounts {
    Available(BTreeMap<String, u64>),
    Unavailable,
}

impl PlatformCounts {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PlatformCounts::Unavailable)
    }

    /// The mapping, if the upstream call succeeded.
    pub fn as_map(&self) -> Option<&BTreeMap<String, u64>> {
        match self {
            PlatformCounts::Available(map) => Some(map),
            PlatformCounts::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trend_point_uses_chart_field_names() {
        let point = TrendPoint {
            label: "Apr 10".to_string(),
            positive: 2,
            neutral: 1,
            negative: 4,
        };
        let encoded = serde_json::to_value(&point).unwrap();
        assert_eq!(
            encoded,
            json!({"name": "Apr 10", "positive": 2, "neutral": 1, "negative": 4})
        );
    }

    #[test]
    fn category_count_uses_chart_field_names() {
        let slice = CategoryCount {
            label: "Infrastructure".to_string(),
            count: 3,
        };
        let encoded = serde_json::to_value(&slice).unwrap();
        assert_eq!(encoded, json!({"name": "Infrastructure", "value": 3}));
    }
}
