use serde::{Deserialize, Serialize};

/// Normalized company profile data from a provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Canonical uppercase symbol
    pub symbol: String,

    /// Company name as reported by the provider; may be empty, in
    /// which case display resolution falls back to the static lookup
    /// table and finally to the raw symbol.
    pub name: String,

    /// Market capitalization in absolute units. Providers reporting in
    /// millions are scaled by 1e6 at the adapter. 0.0 if unknown.
    pub market_cap: f64,

    /// Industry classification; empty means the provider omitted it
    /// ("unknown"), not a real category.
    pub industry: String,

    /// Company website URL, possibly empty
    pub website: String,

    /// Logo URL, possibly empty
    pub logo_url: String,
}

impl CompanyProfile {
    /// Create an empty profile for a symbol.
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile() {
        let profile = CompanyProfile::empty("nvda");
        assert_eq!(profile.symbol, "NVDA");
        assert_eq!(profile.market_cap, 0.0);
        assert!(profile.industry.is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let profile = CompanyProfile {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            market_cap: 2.8e12,
            industry: "Technology".to_string(),
            website: "https://www.apple.com/".to_string(),
            logo_url: String::new(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("marketCap"));
        assert!(json.contains("logoUrl"));
    }
}
