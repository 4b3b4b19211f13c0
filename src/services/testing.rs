//! Scripted [`Upstream`] for unit tests

use crate::error::UpstreamError;
use crate::models::VolumePoint;
use crate::services::upstream::{
    AddressBalance, AddressList, BlockSummary, ChartSeries, MarketChart, RawBlock,
    RawTransaction, TickerPrice, TxOutput, UnconfirmedTransactions, Upstream,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn offline<T>() -> Result<T, UpstreamError> {
    Err(UpstreamError::Transport("connection refused".to_string()))
}

/// Every endpoint fails with a transport error until scripted otherwise
pub struct FakeUpstream {
    pub price: Result<TickerPrice, UpstreamError>,
    pub market_chart: Result<MarketChart, UpstreamError>,
    pub volume_chart: Result<ChartSeries, UpstreamError>,
    pub rich_addresses: Result<AddressList, UpstreamError>,
    pub blocks: Result<Vec<BlockSummary>, UpstreamError>,
    pub raw_blocks: HashMap<String, Result<RawBlock, UpstreamError>>,
    pub unconfirmed: Result<UnconfirmedTransactions, UpstreamError>,

    pub price_calls: AtomicUsize,
    pub market_chart_calls: AtomicUsize,
    pub volume_chart_calls: AtomicUsize,
    pub rich_calls: AtomicUsize,
    pub unconfirmed_calls: AtomicUsize,
    pub fetched_blocks: Mutex<Vec<String>>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            price: offline(),
            market_chart: offline(),
            volume_chart: offline(),
            rich_addresses: offline(),
            blocks: offline(),
            raw_blocks: HashMap::new(),
            unconfirmed: offline(),
            price_calls: AtomicUsize::new(0),
            market_chart_calls: AtomicUsize::new(0),
            volume_chart_calls: AtomicUsize::new(0),
            rich_calls: AtomicUsize::new(0),
            unconfirmed_calls: AtomicUsize::new(0),
            fetched_blocks: Mutex::new(Vec::new()),
        }
    }
}

impl FakeUpstream {
    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Ok(TickerPrice { price: price.to_string() });
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<(&str, RawBlock)>) -> Self {
        self.blocks = Ok(blocks
            .iter()
            .enumerate()
            .map(|(i, (hash, block))| BlockSummary {
                hash: hash.to_string(),
                height: Some(800_000 + i as u64),
                time: block.time,
            })
            .collect());
        self.raw_blocks = blocks
            .into_iter()
            .map(|(hash, block)| (hash.to_string(), Ok(block)))
            .collect();
        self
    }

    pub fn with_unconfirmed(mut self, txs: Vec<RawTransaction>) -> Self {
        self.unconfirmed = Ok(UnconfirmedTransactions { txs });
        self
    }

    pub fn with_rich_addresses(mut self, entries: &[(&str, f64)]) -> Self {
        self.rich_addresses = Ok(AddressList {
            data: entries
                .iter()
                .map(|(address, balance)| AddressBalance {
                    address: address.to_string(),
                    balance: *balance,
                })
                .collect(),
        });
        self
    }

    pub fn with_market_chart(mut self, points: &[(f64, f64)]) -> Self {
        self.market_chart = Ok(MarketChart { total_volumes: points.to_vec() });
        self
    }

    pub fn with_volume_chart(mut self, points: &[VolumePoint]) -> Self {
        self.volume_chart = Ok(ChartSeries { values: points.to_vec() });
        self
    }

    pub fn fetched_blocks(&self) -> Vec<String> {
        self.fetched_blocks.lock().unwrap().clone()
    }
}

/// Transaction paying out `btc_outputs` (in BTC) from `input_count` inputs
pub fn tx(hash: &str, time: i64, input_count: usize, btc_outputs: &[f64]) -> RawTransaction {
    RawTransaction {
        hash: hash.to_string(),
        time: Some(time),
        inputs: vec![serde_json::Value::Null; input_count],
        out: btc_outputs
            .iter()
            .map(|btc| TxOutput { value: (btc * 100_000_000.0).round() as u64 })
            .collect(),
    }
}

pub fn block(time: i64, txs: Vec<RawTransaction>) -> RawBlock {
    RawBlock { time: Some(time), tx: txs }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn ticker_price(&self) -> Result<TickerPrice, UpstreamError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.price.clone()
    }

    async fn market_chart(&self) -> Result<MarketChart, UpstreamError> {
        self.market_chart_calls.fetch_add(1, Ordering::SeqCst);
        self.market_chart.clone()
    }

    async fn volume_chart(&self) -> Result<ChartSeries, UpstreamError> {
        self.volume_chart_calls.fetch_add(1, Ordering::SeqCst);
        self.volume_chart.clone()
    }

    async fn rich_addresses(&self, _limit: usize) -> Result<AddressList, UpstreamError> {
        self.rich_calls.fetch_add(1, Ordering::SeqCst);
        self.rich_addresses.clone()
    }

    async fn blocks_since(&self, _since: i64) -> Result<Vec<BlockSummary>, UpstreamError> {
        self.blocks.clone()
    }

    async fn raw_block(&self, hash: &str) -> Result<RawBlock, UpstreamError> {
        self.fetched_blocks.lock().unwrap().push(hash.to_string());
        self.raw_blocks
            .get(hash)
            .cloned()
            .unwrap_or_else(|| Err(UpstreamError::Status(404)))
    }

    async fn unconfirmed_transactions(&self) -> Result<UnconfirmedTransactions, UpstreamError> {
        self.unconfirmed_calls.fetch_add(1, Ordering::SeqCst);
        self.unconfirmed.clone()
    }
}
