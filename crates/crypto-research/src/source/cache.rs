//! TTL cache in front of a market data source.
//!
//! Price histories and protocol payloads are cached per request arguments.
//! Spot prices and market data always go upstream. Errors are never cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::MarketDataSource;
use crate::error::Result;
use crate::model::PriceSeries;

type HistoryKey = (String, u32, String);

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

struct TtlMap<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlMap<K, V> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < ttl)
            .map(|entry| entry.value.clone())
    }

    /// Insert and evict anything already past `ttl`
    async fn insert(&self, key: K, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}

/// Caching decorator for any [`MarketDataSource`]
pub struct CachedMarketData<S> {
    inner: S,
    ttl: Duration,
    histories: TtlMap<HistoryKey, PriceSeries>,
    protocols: TtlMap<String, Value>,
}

impl<S: MarketDataSource> CachedMarketData<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            histories: TtlMap::new(),
            protocols: TtlMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: MarketDataSource> MarketDataSource for CachedMarketData<S> {
    async fn get_price_history(
        &self,
        token_id: &str,
        days: u32,
        vs_currency: &str,
    ) -> Result<PriceSeries> {
        let key = (token_id.to_string(), days, vs_currency.to_string());
        if let Some(series) = self.histories.get(&key, self.ttl).await {
            tracing::debug!(token_id, days, "Price history cache hit");
            return Ok(series);
        }

        let series = self
            .inner
            .get_price_history(token_id, days, vs_currency)
            .await?;
        self.histories.insert(key, series.clone(), self.ttl).await;
        Ok(series)
    }

    async fn get_simple_price(&self, token_id: &str, vs_currency: &str) -> Result<Value> {
        self.inner.get_simple_price(token_id, vs_currency).await
    }

    async fn get_market_data(&self, token_id: &str) -> Result<Value> {
        self.inner.get_market_data(token_id).await
    }

    async fn get_protocol_data(&self, protocol: &str) -> Result<Value> {
        let key = protocol.to_lowercase();
        if let Some(payload) = self.protocols.get(&key, self.ttl).await {
            tracing::debug!(protocol, "Protocol payload cache hit");
            return Ok(payload);
        }

        let payload = self.inner.get_protocol_data(protocol).await?;
        // error markers are upstream failures too
        if payload.get("error").is_none() {
            self.protocols.insert(key, payload.clone(), self.ttl).await;
        }
        Ok(payload)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
