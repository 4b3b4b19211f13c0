use crate::constants::FALLBACK_BTC_PRICE;
use crate::models::{LargeTransaction, RichListEntry, VolumePoint};
use crate::utils::format::{format_number, FormatMode};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub current_btc_price: String,
    pub transactions: Vec<LargeTransaction>,
    pub rich_list: Vec<RichListEntry>,
    pub historical_volume: Vec<VolumePoint>,
}

impl Default for AggregateResponse {
    fn default() -> Self {
        Self {
            current_btc_price: format_number(FALLBACK_BTC_PRICE, FormatMode::Price),
            transactions: Vec::new(),
            rich_list: Vec::new(),
            historical_volume: Vec::new(),
        }
    }
}
