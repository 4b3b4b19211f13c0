use crate::constants::{FALLBACK_BTC_PRICE, PRICE_CACHE_TTL};
use crate::error::UpstreamError;
use crate::services::ttl_cache::{CacheStats, TtlCache};
use crate::services::upstream::{TickerPrice, Upstream};
use std::sync::Arc;
use tracing::{error, info};

/// Current BTC/USD spot price, refreshed at most every 30 seconds
pub struct PriceSource {
    upstream: Arc<dyn Upstream>,
    cache: TtlCache<(), f64>,
}

impl PriceSource {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self {
            upstream,
            cache: TtlCache::new("btc_price"),
        }
    }

    /// Spot price in USD. Falls back to [`FALLBACK_BTC_PRICE`] when the ticker is unavailable.
    pub async fn get_price(&self) -> f64 {
        self.cache
            .get_or_compute((), PRICE_CACHE_TTL, || self.fetch_price())
            .await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn fetch_price(&self) -> f64 {
        let result = self.upstream.ticker_price().await.and_then(parse_ticker);

        match result {
            Ok(price) => {
                info!(price, "BTC price fetched successfully");
                price
            }
            Err(UpstreamError::Status(code)) => {
                error!("BTC price API error: status code {}", code);
                FALLBACK_BTC_PRICE
            }
            Err(UpstreamError::Transport(e)) => {
                error!("Error fetching BTC price: {}", e);
                FALLBACK_BTC_PRICE
            }
            Err(UpstreamError::Payload(e)) => {
                error!("Malformed BTC price payload: {}", e);
                FALLBACK_BTC_PRICE
            }
        }
    }
}

fn parse_ticker(ticker: TickerPrice) -> Result<f64, UpstreamError> {
    let price: f64 = ticker
        .price
        .trim()
        .parse()
        .map_err(|_| UpstreamError::Payload(format!("price is not a number: {:?}", ticker.price)))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(UpstreamError::Payload(format!("price out of range: {}", price)));
    }

    Ok(price)
}
