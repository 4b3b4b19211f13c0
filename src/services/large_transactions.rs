//! Large Transaction Scanner
//!
//! Looks for whale-sized transfers in two places:
//! 1. Blocks mined during the last 24 hours (first 5 blocks only), keeping
//!    transactions above 100 BTC.
//! 2. If nothing qualified, the unconfirmed pool, keeping transactions above 50 BTC.
//!
//! Raw blocks are fetched one at a time with a fixed pause between requests so
//! the explorer does not rate-limit us. Results are never cached; the price
//! passed in comes from the cached price source.

use crate::constants::{
    BLOCK_TX_THRESHOLD_BTC, MAX_BLOCKS_SCANNED, MAX_TRANSACTIONS, MEMPOOL_TX_THRESHOLD_BTC,
    SATOSHIS_PER_BTC,
};
use crate::error::UpstreamError;
use crate::models::LargeTransaction;
use crate::services::upstream::{RawTransaction, Upstream};
use crate::utils::format::{format_number, FormatMode};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct LargeTransactionSource {
    upstream: Arc<dyn Upstream>,
    block_fetch_delay: Duration,
}

impl LargeTransactionSource {
    pub fn new(upstream: Arc<dyn Upstream>, block_fetch_delay: Duration) -> Self {
        Self {
            upstream,
            block_fetch_delay,
        }
    }

    /// Top transactions by BTC amount, largest first, at most [`MAX_TRANSACTIONS`]
    pub async fn get_large_transactions(&self, current_price: f64) -> Vec<LargeTransaction> {
        let since = (Utc::now() - ChronoDuration::hours(24)).timestamp();

        let confirmed = self.scan_recent_blocks(since, current_price).await;
        if !confirmed.is_empty() {
            info!("Fetched {} large transactions", confirmed.len());
            return confirmed;
        }

        let pending = self.scan_unconfirmed(current_price).await;
        info!("Fetched {} unconfirmed transactions", pending.len());
        pending
    }

    async fn scan_recent_blocks(&self, since: i64, current_price: f64) -> Vec<LargeTransaction> {
        let blocks = match self.upstream.blocks_since(since).await {
            Ok(blocks) => blocks,
            Err(UpstreamError::Status(code)) => {
                error!("Blockchain.info API error: status code {}", code);
                return Vec::new();
            }
            Err(e) => {
                error!("Error fetching large transactions: {}", e);
                return Vec::new();
            }
        };

        debug!("{} blocks mined since {}, scanning up to {}", blocks.len(), since, MAX_BLOCKS_SCANNED);

        let mut found = Vec::new();
        for (i, block) in blocks.iter().take(MAX_BLOCKS_SCANNED).enumerate() {
            if i > 0 && !self.block_fetch_delay.is_zero() {
                sleep(self.block_fetch_delay).await;
            }

            match self.upstream.raw_block(&block.hash).await {
                Ok(raw) => {
                    let block_time = raw.time.or(block.time);
                    let large = extract_large_transactions(
                        &raw.tx,
                        BLOCK_TX_THRESHOLD_BTC,
                        current_price,
                        block_time,
                    );
                    debug!(
                        block = %block.hash,
                        height = ?block.height,
                        transactions = raw.tx.len(),
                        large = large.len(),
                        "Scanned block"
                    );
                    found.extend(large);
                }
                Err(e) => {
                    warn!("Skipping block {}: {}", block.hash, e);
                }
            }
        }

        rank(found)
    }

    async fn scan_unconfirmed(&self, current_price: f64) -> Vec<LargeTransaction> {
        match self.upstream.unconfirmed_transactions().await {
            Ok(pool) => rank(extract_large_transactions(
                &pool.txs,
                MEMPOOL_TX_THRESHOLD_BTC,
                current_price,
                None,
            )),
            Err(UpstreamError::Status(code)) => {
                error!("Unconfirmed transactions API error: status code {}", code);
                Vec::new()
            }
            Err(e) => {
                error!("Error fetching unconfirmed transactions: {}", e);
                Vec::new()
            }
        }
    }
}

/// Keep transactions whose total output exceeds `threshold_btc`.
///
/// `fallback_time` is used for transactions that carry no timestamp of their own.
fn extract_large_transactions(
    txs: &[RawTransaction],
    threshold_btc: f64,
    current_price: f64,
    fallback_time: Option<i64>,
) -> Vec<LargeTransaction> {
    txs.iter()
        .filter_map(|tx| {
            let output_sats = tx
                .out
                .iter()
                .fold(0u64, |total, output| total.saturating_add(output.value));
            let amount = output_sats as f64 / SATOSHIS_PER_BTC;

            if amount <= threshold_btc {
                return None;
            }

            Some(LargeTransaction {
                hash: tx.hash.clone(),
                amount_btc: format_number(amount, FormatMode::Regular),
                amount_usd: format_number(amount * current_price, FormatMode::Value),
                time: format_tx_time(tx.time.or(fallback_time).unwrap_or(0)),
                input_count: tx.inputs.len(),
                output_count: tx.out.len(),
                amount,
            })
        })
        .collect()
}

/// Largest first, truncated to [`MAX_TRANSACTIONS`]
fn rank(mut transactions: Vec<LargeTransaction>) -> Vec<LargeTransaction> {
    transactions.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    transactions.truncate(MAX_TRANSACTIONS);
    transactions
}

fn format_tx_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .format(TIME_FORMAT)
        .to_string()
}
