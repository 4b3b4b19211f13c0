//! Upstream API boundary
//!
//! [`Upstream`] is the only place the pipeline touches the network. Each method
//! performs exactly one GET and returns either the decoded payload or an
//! [`UpstreamError`] naming what went wrong. No retries.
//!
//! Endpoints:
//! - Binance `/api/v3/ticker/price?symbol=BTCUSDT`
//! - CoinGecko `/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=730&interval=daily`
//! - blockchain.info charts `/charts/estimated-transaction-volume-usd?timespan=2years`
//! - Blockchair `/bitcoin/addresses?limit=10&s=balance(desc)`
//! - blockchain.info `/blocks/{ms}`, `/rawblock/{hash}`, `/unconfirmed-transactions`

use crate::constants::{LONG_TIMEOUT, SHORT_TIMEOUT};
use crate::error::{AppError, UpstreamError};
use crate::models::{UpstreamUrls, VolumePoint};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Binance ticker payload; the price arrives as a decimal string
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub price: String,
}

/// CoinGecko market chart; each point is `[timestamp_ms, volume]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

/// blockchain.info chart; points are already `{x, y}` and are kept as sent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub values: Vec<VolumePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressList {
    #[serde(default)]
    pub data: Vec<AddressBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressBalance {
    #[serde(default)]
    pub address: String,
    /// Balance in satoshis
    #[serde(default)]
    pub balance: f64,
}

/// Entry of the blocks-by-time listing
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSummary {
    pub hash: String,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub tx: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    #[serde(default)]
    pub time: Option<i64>,
    /// Inputs are only counted, never inspected
    #[serde(default)]
    pub inputs: Vec<serde_json::Value>,
    #[serde(default)]
    pub out: Vec<TxOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxOutput {
    /// Value in satoshis
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnconfirmedTransactions {
    #[serde(default)]
    pub txs: Vec<RawTransaction>,
}

/// Read-only access to every upstream the pipeline depends on
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn ticker_price(&self) -> Result<TickerPrice, UpstreamError>;

    async fn market_chart(&self) -> Result<MarketChart, UpstreamError>;

    async fn volume_chart(&self) -> Result<ChartSeries, UpstreamError>;

    async fn rich_addresses(&self, limit: usize) -> Result<AddressList, UpstreamError>;

    /// Blocks mined since `since` (unix seconds)
    async fn blocks_since(&self, since: i64) -> Result<Vec<BlockSummary>, UpstreamError>;

    async fn raw_block(&self, hash: &str) -> Result<RawBlock, UpstreamError>;

    async fn unconfirmed_transactions(&self) -> Result<UnconfirmedTransactions, UpstreamError>;
}

/// reqwest-backed [`Upstream`]
pub struct HttpUpstream {
    urls: UpstreamUrls,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(urls: UpstreamUrls) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("whalewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HttpUpstream: {:?}", urls);

        Ok(Self { urls, client })
    }

    /// GET `url` and decode the JSON body as `T`
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, UpstreamError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(format!("{} (url: {})", e, url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to read body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Payload(format!("{} (url: {})", e, url)))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn ticker_price(&self) -> Result<TickerPrice, UpstreamError> {
        let url = format!("{}/api/v3/ticker/price?symbol=BTCUSDT", self.urls.ticker);
        self.get_json(&url, SHORT_TIMEOUT).await
    }

    async fn market_chart(&self) -> Result<MarketChart, UpstreamError> {
        let url = format!(
            "{}/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=730&interval=daily",
            self.urls.market_chart
        );
        self.get_json(&url, LONG_TIMEOUT).await
    }

    async fn volume_chart(&self) -> Result<ChartSeries, UpstreamError> {
        let url = format!(
            "{}/charts/estimated-transaction-volume-usd?timespan=2years&format=json&cors=true",
            self.urls.charts
        );
        self.get_json(&url, LONG_TIMEOUT).await
    }

    async fn rich_addresses(&self, limit: usize) -> Result<AddressList, UpstreamError> {
        let url = format!(
            "{}/bitcoin/addresses?limit={}&s=balance(desc)",
            self.urls.rich_list, limit
        );
        self.get_json(&url, LONG_TIMEOUT).await
    }

    async fn blocks_since(&self, since: i64) -> Result<Vec<BlockSummary>, UpstreamError> {
        // The listing endpoint takes milliseconds
        let url = format!("{}/blocks/{}000?format=json", self.urls.explorer, since);
        self.get_json(&url, SHORT_TIMEOUT).await
    }

    async fn raw_block(&self, hash: &str) -> Result<RawBlock, UpstreamError> {
        let url = format!("{}/rawblock/{}", self.urls.explorer, hash);
        self.get_json(&url, SHORT_TIMEOUT).await
    }

    async fn unconfirmed_transactions(&self) -> Result<UnconfirmedTransactions, UpstreamError> {
        let url = format!("{}/unconfirmed-transactions?format=json", self.urls.explorer);
        self.get_json(&url, SHORT_TIMEOUT).await
    }
}
