//! Research Configuration
//!
//! Built once and handed to each component at construction.

use std::time::Duration;

use crate::error::{ResearchError, Result};

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_DEFILLAMA_URL: &str = "https://api.llama.fi";

#[derive(Clone, Debug)]
pub struct ResearchConfig {
    /// CoinGecko API base URL
    pub coingecko_url: String,

    /// DefiLlama API base URL
    pub defillama_url: String,

    /// Per-request timeout for upstream APIs
    pub request_timeout: Duration,

    /// Lookback for technical analysis
    pub history_days: u32,

    /// Quote currency
    pub vs_currency: String,

    /// Default chain for on-chain lookups
    pub network: String,

    /// How long fetched history and protocol payloads stay cached
    pub cache_ttl: Duration,

    /// Serve synthetic market data instead of calling upstream APIs
    pub use_mock: bool,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            coingecko_url: DEFAULT_COINGECKO_URL.into(),
            defillama_url: DEFAULT_DEFILLAMA_URL.into(),
            request_timeout: Duration::from_secs(10),
            history_days: 90,
            vs_currency: "usd".into(),
            network: "ethereum".into(),
            cache_ttl: Duration::from_secs(60),
            use_mock: false,
        }
    }
}

impl ResearchConfig {
    /// Read overrides from the environment; unset variables keep defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("COINGECKO_API_URL") {
            config.coingecko_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("DEFILLAMA_API_URL") {
            config.defillama_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("RESEARCH_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse("RESEARCH_TIMEOUT_SECS", &secs)?);
        }
        if let Some(days) = lookup("RESEARCH_HISTORY_DAYS") {
            config.history_days = parse("RESEARCH_HISTORY_DAYS", &days)?;
        }
        if let Some(currency) = lookup("RESEARCH_VS_CURRENCY") {
            config.vs_currency = currency.to_lowercase();
        }
        if let Some(network) = lookup("RESEARCH_NETWORK") {
            config.network = network;
        }
        if let Some(secs) = lookup("RESEARCH_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse("RESEARCH_CACHE_TTL_SECS", &secs)?);
        }
        if let Some(flag) = lookup("RESEARCH_MOCK") {
            config.use_mock = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_days == 0 {
            return Err(ResearchError::Config("history_days must be at least 1".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(ResearchError::Config("request timeout must be non-zero".into()));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ResearchError::Config(format!("{key}: invalid value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.history_days, 90);
        assert_eq!(config.vs_currency, "usd");
        assert!(!config.use_mock);
    }

    #[test]
    fn test_overrides() {
        let config = ResearchConfig::from_lookup(lookup(&[
            ("COINGECKO_API_URL", "http://localhost:9000/"),
            ("RESEARCH_HISTORY_DAYS", "30"),
            ("RESEARCH_VS_CURRENCY", "EUR"),
            ("RESEARCH_MOCK", "true"),
        ]))
        .unwrap();
        assert_eq!(config.coingecko_url, "http://localhost:9000");
        assert_eq!(config.history_days, 30);
        assert_eq!(config.vs_currency, "eur");
        assert!(config.use_mock);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ResearchConfig::from_lookup(lookup(&[("RESEARCH_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ResearchConfig::from_lookup(lookup(&[("RESEARCH_HISTORY_DAYS", "0")])).is_err());
    }
}
