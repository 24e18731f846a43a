//! Error Types for Crypto Research

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    /// Network/API failure or unknown identifier at a data source.
    /// The message already carries its context (e.g. "CoinGecko history error: ...").
    #[error("{0}")]
    Fetch(String),

    /// The source answered but there was nothing to compute on
    #[error("{0}")]
    NoData(String),

    /// Error marker found inside an upstream payload, passed through verbatim
    #[error("{0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ResearchError {
    pub fn no_price_data() -> Self {
        Self::NoData("No price data available".into())
    }
}
