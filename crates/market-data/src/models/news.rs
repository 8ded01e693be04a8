use serde::{Deserialize, Serialize};

/// News category filter accepted by the news endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    General,
    Forex,
    Crypto,
    Merger,
}

impl NewsCategory {
    /// All supported categories, in display order.
    pub const ALL: [NewsCategory; 4] = [
        Self::General,
        Self::Forex,
        Self::Crypto,
        Self::Merger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Merger => "merger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(Self::General),
            "forex" => Some(Self::Forex),
            "crypto" => Some(Self::Crypto),
            "merger" => Some(Self::Merger),
            _ => None,
        }
    }
}

impl Default for NewsCategory {
    fn default() -> Self {
        Self::General
    }
}

/// Normalized news article.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    /// Publication time as unix seconds
    pub published_at: i64,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An aggregated news result.
///
/// `demo_data` is a soft warning: when the provider failed or returned
/// nothing, the built-in demo article set is substituted and this flag
/// tells the caller to show a non-blocking "showing demo data" notice.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub articles: Vec<NewsArticle>,
    pub demo_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in NewsCategory::ALL {
            assert_eq!(NewsCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(NewsCategory::parse("CRYPTO"), Some(NewsCategory::Crypto));
        assert_eq!(NewsCategory::parse("bonds"), None);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&NewsCategory::Merger).unwrap();
        assert_eq!(json, "\"merger\"");
    }
}
