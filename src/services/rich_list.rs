use crate::constants::{wallet_label, RICH_LIST_CACHE_TTL, RICH_LIST_SIZE, SATOSHIS_PER_BTC};
use crate::error::UpstreamError;
use crate::models::RichListEntry;
use crate::services::price::PriceSource;
use crate::services::ttl_cache::{CacheStats, TtlCache};
use crate::services::upstream::{AddressBalance, Upstream};
use crate::utils::format::{format_number, FormatMode};
use std::sync::Arc;
use tracing::{error, info};

/// Largest BTC holders, labelled and priced in USD
pub struct RichListSource {
    upstream: Arc<dyn Upstream>,
    price: Arc<PriceSource>,
    /// Keyed by list length
    cache: TtlCache<usize, Vec<RichListEntry>>,
}

impl RichListSource {
    pub fn new(upstream: Arc<dyn Upstream>, price: Arc<PriceSource>) -> Self {
        Self {
            upstream,
            price,
            cache: TtlCache::new("rich_list"),
        }
    }

    /// Top addresses by balance, in upstream order
    pub async fn get_rich_list(&self) -> Vec<RichListEntry> {
        self.cache
            .get_or_compute(RICH_LIST_SIZE, RICH_LIST_CACHE_TTL, || {
                self.fetch_rich_list(RICH_LIST_SIZE)
            })
            .await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn fetch_rich_list(&self, limit: usize) -> Vec<RichListEntry> {
        let addresses = match self.upstream.rich_addresses(limit).await {
            Ok(list) => list.data,
            Err(UpstreamError::Status(code)) => {
                error!("Blockchair API error: status code {}", code);
                return Vec::new();
            }
            Err(e) => {
                error!("Error in get_rich_list: {}", e);
                return Vec::new();
            }
        };

        let current_price = self.price.get_price().await;
        let rich_list: Vec<RichListEntry> = addresses
            .into_iter()
            .take(limit)
            .map(|entry| to_entry(entry, current_price))
            .collect();

        info!("Rich list generated successfully with {} addresses", rich_list.len());
        rich_list
    }
}

fn to_entry(entry: AddressBalance, current_price: f64) -> RichListEntry {
    let balance_btc = entry.balance / SATOSHIS_PER_BTC;
    let label = wallet_label(&entry.address).to_string();

    RichListEntry {
        balance_btc: format_number(balance_btc, FormatMode::Regular),
        balance_usd: format_number(balance_btc * current_price, FormatMode::Value),
        label,
        address: entry.address,
    }
}
