//! # Feedback API Client
//!
//! The dataset operations of the data layer. Every operation here absorbs
//! its own failure: transport errors, non-2xx statuses and malformed bodies
//! never propagate to the caller. Three of the four operations substitute
//! the compiled-in sample data; the platform breakdown instead returns an
//! explicit unavailable sentinel (see [`FeedbackApi::fetch_platform_breakdown`]).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::aggregate;
use crate::configs::RuntimeConfig;
use crate::loggers::AdvisoryChannel;
use crate::models::{Category, CategoryCount, Platform, PlatformCounts, Record, Sentiment, TrendPoint};
use crate::retrieve::http::ApiClient;
use crate::samples;

/// Filter options for [`FeedbackApi::fetch_posts`], encoded as query
/// parameters. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub limit: Option<u32>,
    pub platform: Option<Platform>,
    pub category: Option<Category>,
    pub sentiment: Option<Sentiment>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(platform) = self.platform {
            params.push(("platform", platform.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(sentiment) = self.sentiment {
            params.push(("sentiment", sentiment.to_string()));
        }
        params
    }
}

/// Client for the feedback REST endpoints, with the absorb-all-failure
/// contract described in the module docs.
pub struct FeedbackApi {
    client: ApiClient,
    advisory: Arc<AdvisoryChannel>,
}

impl FeedbackApi {
    pub fn new(config: &RuntimeConfig, advisory: Arc<AdvisoryChannel>) -> Self {
        Self {
            client: ApiClient::new(
                config.api_base_url.clone(),
                config.api_token.clone(),
                config.http_timeout,
                config.http_retries,
            ),
            advisory,
        }
    }

    /// Emits a single advisory notice describing upstream reachability.
    /// Advisory only: no caller decision should depend on it.
    pub async fn probe(&self) {
        let query = [("limit", "1".to_string())];
        match self.client.get::<serde_json::Value>("posts", &query).await {
            Ok(resp) if resp.success => self
                .advisory
                .info("Feedback API reachable", Some(json!({"status": resp.status}))),
            Ok(resp) => self.advisory.warn(
                "Feedback API responded with an error status",
                Some(json!({"status": resp.status})),
            ),
            Err(err) => self.advisory.warn(
                "Feedback API unreachable",
                Some(json!({"error": err.to_string()})),
            ),
        }
    }

    /// Fetches posts matching `query` from `GET /posts`.
    ///
    /// On any failure the seeded social-media posts are returned instead,
    /// unfiltered. The query options only apply upstream.
    pub async fn fetch_posts(&self, query: &PostQuery) -> Vec<Record> {
        match self.client.get::<Vec<Record>>("posts", &query.to_params()).await {
            Ok(resp) if resp.success => match resp.data {
                Some(posts) => posts,
                None => {
                    self.advise_fallback("posts", "empty response body");
                    samples::social_posts()
                }
            },
            Ok(resp) => {
                self.advise_fallback("posts", &format!("HTTP status {}", resp.status));
                samples::social_posts()
            }
            Err(err) => {
                self.advise_fallback("posts", &err.to_string());
                samples::social_posts()
            }
        }
    }

    /// Fetches the sentiment trend for the trailing `days` window from
    /// `GET /trend-data`. On failure the trend is computed locally from the
    /// seeded posts.
    pub async fn fetch_trend(&self, days: u32) -> Vec<TrendPoint> {
        let query = [("days", days.to_string())];
        match self.client.get::<Vec<TrendPoint>>("trend-data", &query).await {
            Ok(resp) if resp.success => match resp.data {
                Some(points) => points,
                None => {
                    self.advise_fallback("trend-data", "empty response body");
                    aggregate::sentiment_trend(&samples::social_posts(), u64::from(days))
                }
            },
            Ok(resp) => {
                self.advise_fallback("trend-data", &format!("HTTP status {}", resp.status));
                aggregate::sentiment_trend(&samples::social_posts(), u64::from(days))
            }
            Err(err) => {
                self.advise_fallback("trend-data", &err.to_string());
                aggregate::sentiment_trend(&samples::social_posts(), u64::from(days))
            }
        }
    }

    /// Fetches the category breakdown from `GET /category-data`. On failure
    /// the breakdown is computed locally from the seeded posts.
    pub async fn fetch_category_breakdown(&self) -> Vec<CategoryCount> {
        match self.client.get::<Vec<CategoryCount>>("category-data", &[]).await {
            Ok(resp) if resp.success => match resp.data {
                Some(slices) => slices,
                None => {
                    self.advise_fallback("category-data", "empty response body");
                    aggregate::category_slices(&samples::social_posts())
                }
            },
            Ok(resp) => {
                self.advise_fallback("category-data", &format!("HTTP status {}", resp.status));
                aggregate::category_slices(&samples::social_posts())
            }
            Err(err) => {
                self.advise_fallback("category-data", &err.to_string());
                aggregate::category_slices(&samples::social_posts())
            }
        }
    }

    /// Fetches the platform breakdown from `GET /platform-data`.
    ///
    /// Asymmetry, kept deliberately: unlike the three operations above this
    /// one does NOT substitute sample data on failure. Callers observe
    /// [`PlatformCounts::Unavailable`] and are expected to derive counts
    /// themselves via [`aggregate::platform_counts`] over the seeded posts.
    pub async fn fetch_platform_breakdown(&self) -> PlatformCounts {
        match self
            .client
            .get::<BTreeMap<String, u64>>("platform-data", &[])
            .await
        {
            Ok(resp) if resp.success => match resp.data {
                Some(map) => PlatformCounts::Available(map),
                None => {
                    self.advise_unavailable("empty response body");
                    PlatformCounts::Unavailable
                }
            },
            Ok(resp) => {
                self.advise_unavailable(&format!("HTTP status {}", resp.status));
                PlatformCounts::Unavailable
            }
            Err(err) => {
                self.advise_unavailable(&err.to_string());
                PlatformCounts::Unavailable
            }
        }
    }

    fn advise_fallback(&self, dataset: &str, reason: &str) {
        self.advisory.warn(
            "Showing sample data",
            Some(json!({"dataset": dataset, "reason": reason})),
        );
    }

    fn advise_unavailable(&self, reason: &str) {
        self.advisory.warn(
            "Platform breakdown unavailable",
            Some(json!({"dataset": "platform-data", "reason": reason})),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::websocket_url_for;
    use crate::loggers::NoticeLevel;
    use std::time::Duration;
    use url::Url;

    /// Nothing listens on this port; every request fails at connect time.
    fn unreachable_config() -> RuntimeConfig {
        let base = Url::parse("http://127.0.0.1:9/").unwrap();
        RuntimeConfig {
            ws_url: websocket_url_for(&base).unwrap(),
            api_base_url: base,
            api_token: None,
            http_timeout: Duration::from_secs(2),
            http_retries: 0,
        }
    }

    #[tokio::test]
    async fn fetch_posts_substitutes_the_sample_set() {
        let advisory = AdvisoryChannel::shared();
        let api = FeedbackApi::new(&unreachable_config(), advisory.clone());
        let mut rx = advisory.subscribe();

        let posts = api.fetch_posts(&PostQuery::new()).await;

        assert_eq!(posts, samples::social_posts());
        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warn);
    }

    #[tokio::test]
    async fn fetch_posts_ignores_filters_in_the_fallback() {
        let api = FeedbackApi::new(&unreachable_config(), AdvisoryChannel::shared());
        let query = PostQuery {
            limit: Some(1),
            platform: Some(Platform::Twitter),
            ..PostQuery::new()
        };

        let posts = api.fetch_posts(&query).await;
        assert_eq!(posts, samples::social_posts());
    }

    #[tokio::test]
    async fn fetch_trend_substitutes_a_locally_computed_series() {
        let api = FeedbackApi::new(&unreachable_config(), AdvisoryChannel::shared());

        let points = api.fetch_trend(7).await;

        // One point per day, window end inclusive.
        assert_eq!(points.len(), 8);
    }

    #[tokio::test]
    async fn fetch_category_breakdown_substitutes_local_slices() {
        let api = FeedbackApi::new(&unreachable_config(), AdvisoryChannel::shared());

        let slices = api.fetch_category_breakdown().await;

        assert_eq!(slices, aggregate::category_slices(&samples::social_posts()));
    }

    #[tokio::test]
    async fn fetch_platform_breakdown_returns_the_sentinel() {
        let api = FeedbackApi::new(&unreachable_config(), AdvisoryChannel::shared());

        let counts = api.fetch_platform_breakdown().await;

        // The sentinel, not substituted data.
        assert!(counts.is_unavailable());
        assert_eq!(counts.as_map(), None);
    }
}
