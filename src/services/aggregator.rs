use crate::error::AppError;
use crate::models::{AggregateResponse, AppConfig};
use crate::services::large_transactions::LargeTransactionSource;
use crate::services::price::PriceSource;
use crate::services::rich_list::RichListSource;
use crate::services::ttl_cache::CacheStats;
use crate::services::upstream::{HttpUpstream, Upstream};
use crate::services::volume::VolumeSource;
use crate::utils::format::{format_number, FormatMode};
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Cache activity per cached source
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SourceCacheStats {
    pub price: CacheStats,
    pub volume: CacheStats,
    pub rich_list: CacheStats,
}

/// Composes every source into the `/api/data` body.
///
/// Each field is fetched on its own; a failing source only degrades its own
/// field.
pub struct Aggregator {
    price: Arc<PriceSource>,
    volume: VolumeSource,
    rich_list: RichListSource,
    transactions: LargeTransactionSource,
}

impl Aggregator {
    pub fn new(upstream: Arc<dyn Upstream>, block_fetch_delay: Duration) -> Self {
        let price = Arc::new(PriceSource::new(upstream.clone()));

        Self {
            volume: VolumeSource::new(upstream.clone()),
            rich_list: RichListSource::new(upstream.clone(), price.clone()),
            transactions: LargeTransactionSource::new(upstream, block_fetch_delay),
            price,
        }
    }

    /// Build an aggregator talking to the real upstreams named in `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let upstream = HttpUpstream::new(config.upstreams.clone())?;
        Ok(Self::new(Arc::new(upstream), config.block_fetch_delay))
    }

    /// Assemble the full response. Never fails; degraded fields fall back to defaults.
    #[instrument(skip(self))]
    pub async fn collect(&self) -> AggregateResponse {
        let current_price = self.price.get_price().await;
        let rich_list = self.rich_list.get_rich_list().await;
        let historical_volume = self.volume.get_historical_volume().await;

        let transactions = match AssertUnwindSafe(
            self.transactions.get_large_transactions(current_price),
        )
        .catch_unwind()
        .await
        {
            Ok(transactions) => transactions,
            Err(_) => {
                error!("Error in get_large_transactions: scan aborted, returning no transactions");
                Vec::new()
            }
        };

        info!(
            price = current_price,
            transactions = transactions.len(),
            rich_list = rich_list.len(),
            volume_points = historical_volume.len(),
            "Aggregated BTC data"
        );

        AggregateResponse {
            current_btc_price: format_number(current_price, FormatMode::Price),
            transactions,
            rich_list,
            historical_volume,
        }
    }

    pub async fn cache_stats(&self) -> SourceCacheStats {
        SourceCacheStats {
            price: self.price.cache_stats().await,
            volume: self.volume.cache_stats().await,
            rich_list: self.rich_list.cache_stats().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::models::VolumePoint;
    use crate::services::testing::{block, tx, FakeUpstream};
    use crate::services::upstream::{
        AddressList, BlockSummary, ChartSeries, MarketChart, RawBlock, TickerPrice,
        UnconfirmedTransactions,
    };
    use async_trait::async_trait;

    const T0: i64 = 1_700_000_000;

    #[tokio::test]
    async fn test_total_outage_yields_well_formed_defaults() {
        let aggregator = Aggregator::new(Arc::new(FakeUpstream::default()), Duration::ZERO);

        let response = aggregator.collect().await;

        assert_eq!(response, AggregateResponse::default());
        assert_eq!(response.current_btc_price, "65,000.00");
    }

    #[tokio::test]
    async fn test_all_sources_merged() {
        let upstream = FakeUpstream::default()
            .with_price("70000")
            .with_market_chart(&[(1_700_000_000_000.0, 5.0)])
            .with_rich_addresses(&[("38UmuUqPCrFmQo4khkomQwZ4VbY2nZMJ67", 1_000_000_000_000.0)])
            .with_blocks(vec![("b1", block(T0, vec![tx("whale", T0, 1, &[250.0])]))]);
        let aggregator = Aggregator::new(Arc::new(upstream), Duration::ZERO);

        let response = aggregator.collect().await;

        assert_eq!(response.current_btc_price, "70,000.00");
        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.transactions[0].amount_usd, "$17.50M");
        assert_eq!(response.rich_list[0].label, "Kraken");
        assert_eq!(response.rich_list[0].balance_usd, "$700.00M");
        assert_eq!(response.historical_volume, vec![VolumePoint::new(1_700_000_000, 5.0)]);
    }

    #[tokio::test]
    async fn test_one_failing_source_does_not_blank_others() {
        let upstream = FakeUpstream {
            rich_addresses: Err(UpstreamError::Payload("unexpected shape".to_string())),
            ..FakeUpstream::default()
                .with_price("70000")
                .with_market_chart(&[(1_700_000_000_000.0, 5.0)])
        };
        let aggregator = Aggregator::new(Arc::new(upstream), Duration::ZERO);

        let response = aggregator.collect().await;

        assert_eq!(response.current_btc_price, "70,000.00");
        assert!(response.rich_list.is_empty());
        assert_eq!(response.historical_volume.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_stats_reflect_shared_price_cache() {
        let upstream = FakeUpstream::default()
            .with_price("70000")
            .with_rich_addresses(&[("1SomeoneElse", 100_000_000.0)]);
        let aggregator = Aggregator::new(Arc::new(upstream), Duration::ZERO);

        aggregator.collect().await;
        aggregator.collect().await;

        let stats = aggregator.cache_stats().await;
        assert_eq!(stats.price.misses, 1);
        assert!(stats.price.hits >= 2);
        assert_eq!(stats.rich_list, CacheStats { entries: 1, hits: 1, misses: 1 });
    }

    /// Panics while listing blocks, answers everything else
    struct BrokenExplorer(FakeUpstream);

    #[async_trait]
    impl Upstream for BrokenExplorer {
        async fn ticker_price(&self) -> Result<TickerPrice, UpstreamError> {
            self.0.ticker_price().await
        }

        async fn market_chart(&self) -> Result<MarketChart, UpstreamError> {
            self.0.market_chart().await
        }

        async fn volume_chart(&self) -> Result<ChartSeries, UpstreamError> {
            self.0.volume_chart().await
        }

        async fn rich_addresses(&self, limit: usize) -> Result<AddressList, UpstreamError> {
            self.0.rich_addresses(limit).await
        }

        async fn blocks_since(&self, _since: i64) -> Result<Vec<BlockSummary>, UpstreamError> {
            panic!("explorer exploded");
        }

        async fn raw_block(&self, hash: &str) -> Result<RawBlock, UpstreamError> {
            self.0.raw_block(hash).await
        }

        async fn unconfirmed_transactions(&self) -> Result<UnconfirmedTransactions, UpstreamError> {
            self.0.unconfirmed_transactions().await
        }
    }

    #[tokio::test]
    async fn test_panicking_scan_keeps_other_fields() {
        let upstream = BrokenExplorer(FakeUpstream::default().with_price("70000"));
        let aggregator = Aggregator::new(Arc::new(upstream), Duration::ZERO);

        let response = aggregator.collect().await;

        assert_eq!(response.current_btc_price, "70,000.00");
        assert!(response.transactions.is_empty());
    }
}
