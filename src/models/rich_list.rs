use serde::{Deserialize, Serialize};

/// One address of the rich list, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichListEntry {
    pub address: String,
    pub balance_btc: String,
    pub balance_usd: String,
    /// Exchange or whale name, "Unknown Wallet" when not in the label table
    #[serde(rename = "type")]
    pub label: String,
}
