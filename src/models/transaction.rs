use serde::{Deserialize, Serialize};

/// A transaction above the reporting threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeTransaction {
    pub hash: String,
    pub amount_btc: String,
    pub amount_usd: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC
    pub time: String,
    #[serde(rename = "inputs")]
    pub input_count: usize,
    #[serde(rename = "outputs")]
    pub output_count: usize,
    /// Unformatted BTC amount, used for ordering
    #[serde(skip)]
    pub amount: f64,
}
