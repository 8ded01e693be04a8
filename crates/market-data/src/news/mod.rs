//! Market news aggregation.
//!
//! Wraps a provider's news endpoint with the same never-fail contract
//! as the stock aggregator: a failed or empty fetch yields the fixed
//! demo article set with the feed flagged as demo data, so the news
//! panel always has something to render.

use std::sync::Arc;

use chrono::Utc;
use log::warn;

use crate::fallback::demo_articles;
use crate::models::{NewsCategory, NewsFeed};
use crate::provider::MarketDataProvider;

/// Articles retained from a successful provider fetch.
const FEED_LIMIT: usize = 12;

pub struct NewsService {
    provider: Arc<dyn MarketDataProvider>,
}

impl NewsService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the news feed for a category. A provider failure or an
    /// empty result substitutes the demo article set and sets
    /// [`NewsFeed::demo_data`]; this method never returns an error.
    pub async fn market_news(&self, category: NewsCategory) -> NewsFeed {
        match self.provider.news(category).await {
            Ok(articles) if !articles.is_empty() => {
                let articles = articles.into_iter().take(FEED_LIMIT).collect();
                NewsFeed {
                    articles,
                    demo_data: false,
                }
            }
            Ok(_) => {
                warn!(
                    "News fetch for {} returned no articles; serving demo feed",
                    category.as_str()
                );
                demo_feed()
            }
            Err(e) => {
                warn!(
                    "News fetch for {} failed: {}; serving demo feed",
                    category.as_str(),
                    e
                );
                demo_feed()
            }
        }
    }
}

fn demo_feed() -> NewsFeed {
    NewsFeed {
        articles: demo_articles(Utc::now().timestamp()),
        demo_data: true,
    }
}

/// Render a Unix timestamp as a coarse relative age: minutes under an
/// hour, hours under a day, days otherwise.
pub fn time_ago(now: i64, published_at: i64) -> String {
    let elapsed = (now - published_at).max(0);
    if elapsed < 3_600 {
        format!("{}m ago", elapsed / 60)
    } else if elapsed < 86_400 {
        format!("{}h ago", elapsed / 3_600)
    } else {
        format!("{}d ago", elapsed / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::errors::MarketDataError;
    use crate::models::{NewsArticle, StockQuote};

    enum StubBehavior {
        Articles(usize),
        Empty,
        Fail,
    }

    struct StubNewsProvider {
        behavior: StubBehavior,
    }

    #[async_trait]
    impl MarketDataProvider for StubNewsProvider {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn quote(&self, _symbol: &str) -> Result<StockQuote, MarketDataError> {
            Err(MarketDataError::NotSupported {
                operation: "quote".to_string(),
                provider: "STUB".to_string(),
            })
        }

        async fn news(
            &self,
            _category: NewsCategory,
        ) -> Result<Vec<NewsArticle>, MarketDataError> {
            match self.behavior {
                StubBehavior::Articles(count) => Ok((0..count)
                    .map(|i| NewsArticle {
                        id: i.to_string(),
                        headline: format!("Headline {}", i),
                        summary: String::new(),
                        source: "Stub Wire".to_string(),
                        published_at: 1_700_000_000 - i as i64,
                        url: "https://example.com".to_string(),
                        image_url: None,
                    })
                    .collect()),
                StubBehavior::Empty => Ok(vec![]),
                StubBehavior::Fail => Err(MarketDataError::ProviderError {
                    provider: "STUB".to_string(),
                    message: "rigged failure".to_string(),
                }),
            }
        }
    }

    fn service(behavior: StubBehavior) -> NewsService {
        NewsService::new(Arc::new(StubNewsProvider { behavior }))
    }

    #[tokio::test]
    async fn test_sourced_feed_is_capped_at_twelve() {
        let feed = service(StubBehavior::Articles(40))
            .market_news(NewsCategory::General)
            .await;

        assert!(!feed.demo_data);
        assert_eq!(feed.articles.len(), 12);
        assert_eq!(feed.articles[0].headline, "Headline 0");
    }

    #[tokio::test]
    async fn test_short_feed_is_passed_through() {
        let feed = service(StubBehavior::Articles(3))
            .market_news(NewsCategory::Crypto)
            .await;

        assert!(!feed.demo_data);
        assert_eq!(feed.articles.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_result_serves_demo_feed() {
        let feed = service(StubBehavior::Empty)
            .market_news(NewsCategory::General)
            .await;

        assert!(feed.demo_data);
        assert_eq!(feed.articles.len(), 6);
    }

    #[tokio::test]
    async fn test_provider_failure_serves_demo_feed() {
        let feed = service(StubBehavior::Fail)
            .market_news(NewsCategory::Merger)
            .await;

        assert!(feed.demo_data);
        assert_eq!(feed.articles.len(), 6);
        // Demo timestamps read as recent relative to now.
        let now = Utc::now().timestamp();
        assert!(feed.articles.iter().all(|a| now - a.published_at <= 36_000 + 60));
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now, now), "0m ago");
        assert_eq!(time_ago(now, now - 59), "0m ago");
        assert_eq!(time_ago(now, now - 1_800), "30m ago");
        assert_eq!(time_ago(now, now - 7_200), "2h ago");
        assert_eq!(time_ago(now, now - 86_399), "23h ago");
        assert_eq!(time_ago(now, now - 86_400), "1d ago");
        assert_eq!(time_ago(now, now - 259_200), "3d ago");
    }

    #[test]
    fn test_time_ago_clamps_future_timestamps() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now, now + 500), "0m ago");
    }
}
