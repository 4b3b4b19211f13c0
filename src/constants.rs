//! Pipeline Constants
//!
//! Thresholds, cache windows, timeouts and the static wallet label table.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

/// Satoshis per whole bitcoin
pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Price reported when the ticker upstream is unavailable
pub const FALLBACK_BTC_PRICE: f64 = 65_000.0;

/// Cache windows per source
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(30);
pub const VOLUME_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const RICH_LIST_CACHE_TTL: Duration = Duration::from_secs(300);

/// Request timeouts per upstream family
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);
pub const LONG_TIMEOUT: Duration = Duration::from_secs(10);

/// Confirmed transactions must move more than this many BTC
pub const BLOCK_TX_THRESHOLD_BTC: f64 = 100.0;

/// Unconfirmed transactions must move more than this many BTC
pub const MEMPOOL_TX_THRESHOLD_BTC: f64 = 50.0;

/// Only the first blocks of the 24h window are scanned
pub const MAX_BLOCKS_SCANNED: usize = 5;

/// Delay between successive raw block fetches
pub const DEFAULT_BLOCK_FETCH_DELAY_MS: u64 = 200;

/// Length of the transaction list and the rich list
pub const MAX_TRANSACTIONS: usize = 10;
pub const RICH_LIST_SIZE: usize = 10;

/// Label for addresses missing from [`WALLET_LABELS`]
pub const UNKNOWN_WALLET: &str = "Unknown Wallet";

/// Known exchange and whale addresses
pub static WALLET_LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("34xp4vRoCGJym3xR7yCVPFHoCNxv4Twseo", "Binance Cold Wallet"),
        (
            "bc1qgdjqv0av3q56jvd82tkdjpy7gdp9ut8tlqmgrpmv24sq4nw842ns4vw0eh",
            "Bitfinex Cold Wallet",
        ),
        ("1P5ZEDWTKTFGxQjZphgWPQUpe554WKDfHQ", "Huobi Cold Wallet"),
        ("3LQUu4v9z6KNch71j7kbj8GPeAGUo1FW6a", "Binance Hot Wallet"),
        ("bc1qa5wkgaew2dkv56kfvj49j0av5nml45x9ek9hz6", "Unknown Whale"),
        ("1LQoWist8KkaUXSPKZHNvEyfrEkPHzSsCd", "Huobi Cold Wallet 2"),
        ("3Kzh9qAqVWQhEsfQz7zEQL1EuSx5tyNLNS", "OKX Cold Wallet"),
        ("1NDyJtNTjmwk5xPNhjgAMu4HDHigtobu1s", "Binance Cold Wallet 2"),
        ("38UmuUqPCrFmQo4khkomQwZ4VbY2nZMJ67", "Kraken"),
        ("1FeexV6bAHb8ybZjqQMjJrcCrHGW9sb6uF", "Unknown Whale"),
    ])
});

/// Resolve a human label for an address
pub fn wallet_label(address: &str) -> &'static str {
    WALLET_LABELS.get(address).copied().unwrap_or(UNKNOWN_WALLET)
}
