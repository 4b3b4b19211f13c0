use crate::constants::VOLUME_CACHE_TTL;
use crate::error::UpstreamError;
use crate::models::VolumePoint;
use crate::services::ttl_cache::{CacheStats, TtlCache};
use crate::services::upstream::Upstream;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Two years of daily BTC volume.
///
/// CoinGecko is tried first; any failure there switches to the
/// blockchain.info chart, whose series is passed through untouched.
pub struct VolumeSource {
    upstream: Arc<dyn Upstream>,
    cache: TtlCache<(), Vec<VolumePoint>>,
}

impl VolumeSource {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self {
            upstream,
            cache: TtlCache::new("historical_volume"),
        }
    }

    pub async fn get_historical_volume(&self) -> Vec<VolumePoint> {
        self.cache
            .get_or_compute((), VOLUME_CACHE_TTL, || self.fetch_volume())
            .await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn fetch_volume(&self) -> Vec<VolumePoint> {
        match self.upstream.market_chart().await {
            Ok(chart) => {
                info!(points = chart.total_volumes.len(), "Historical volume data fetched from CoinGecko");
                return chart
                    .total_volumes
                    .into_iter()
                    .map(|(timestamp_ms, volume)| VolumePoint::from_millis(timestamp_ms, volume))
                    .collect();
            }
            Err(UpstreamError::Status(code)) => {
                warn!("CoinGecko API error: status code {}, trying blockchain.info", code);
            }
            Err(e) => {
                warn!("CoinGecko request failed: {}, trying blockchain.info", e);
            }
        }

        match self.upstream.volume_chart().await {
            Ok(series) => {
                info!(points = series.values.len(), "Historical volume data fetched from blockchain.info");
                series.values
            }
            Err(UpstreamError::Status(code)) => {
                error!("Historical volume API error: status code {}", code);
                Vec::new()
            }
            Err(e) => {
                error!("Error fetching historical volume data: {}", e);
                Vec::new()
            }
        }
    }
}
