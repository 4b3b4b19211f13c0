use crate::constants::DEFAULT_BLOCK_FETCH_DELAY_MS;
use crate::utils::{env_or, env_parse_or, get_public_dir};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;

/// Base URLs of every upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    /// Spot ticker (Binance)
    pub ticker: String,
    /// Primary market chart (CoinGecko)
    pub market_chart: String,
    /// Secondary volume chart (blockchain.info charts API)
    pub charts: String,
    /// Rich address list (Blockchair)
    pub rich_list: String,
    /// Blocks, raw blocks and unconfirmed pool (blockchain.info)
    pub explorer: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            ticker: "https://api.binance.com".to_string(),
            market_chart: "https://api.coingecko.com".to_string(),
            charts: "https://api.blockchain.info".to_string(),
            rich_list: "https://api.blockchair.com".to_string(),
            explorer: "https://blockchain.info".to_string(),
        }
    }
}

impl UpstreamUrls {
    /// Point every upstream at the same base URL (local mocks, outage drills)
    pub fn all(base_url: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Self {
            ticker: base_url.clone(),
            market_chart: base_url.clone(),
            charts: base_url.clone(),
            rich_list: base_url.clone(),
            explorer: base_url,
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,

    /// Directory holding index.html
    pub public_dir: PathBuf,

    pub upstreams: UpstreamUrls,

    /// Pause between successive raw block fetches
    pub block_fetch_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            upstreams: UpstreamUrls::default(),
            block_fetch_delay: Duration::from_millis(DEFAULT_BLOCK_FETCH_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, defaulting anything unset
    pub fn from_env() -> Self {
        let defaults = UpstreamUrls::default();

        Self {
            port: env_parse_or("PORT", DEFAULT_PORT),
            public_dir: get_public_dir(),
            upstreams: UpstreamUrls {
                ticker: env_or("BINANCE_API_URL", &defaults.ticker),
                market_chart: env_or("COINGECKO_API_URL", &defaults.market_chart),
                charts: env_or("BLOCKCHAIN_CHARTS_URL", &defaults.charts),
                rich_list: env_or("BLOCKCHAIR_API_URL", &defaults.rich_list),
                explorer: env_or("BLOCKCHAIN_INFO_URL", &defaults.explorer),
            },
            block_fetch_delay: Duration::from_millis(env_parse_or(
                "BLOCK_FETCH_DELAY_MS",
                DEFAULT_BLOCK_FETCH_DELAY_MS,
            )),
        }
    }

    /// Override the port (CLI flag wins over environment)
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_trims_trailing_slash() {
        let urls = UpstreamUrls::all("http://127.0.0.1:9000/ ");
        assert_eq!(urls.ticker, "http://127.0.0.1:9000");
        assert_eq!(urls.explorer, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_with_port_overrides_only_when_given() {
        let config = AppConfig::default().with_port(None);
        assert_eq!(config.port, DEFAULT_PORT);

        let config = AppConfig::default().with_port(Some(8080));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_numeric_env_falls_back() {
        std::env::set_var("WHALEWATCH_TEST_DELAY_MS", "soon");
        assert_eq!(env_parse_or("WHALEWATCH_TEST_DELAY_MS", 200u64), 200);

        std::env::set_var("WHALEWATCH_TEST_DELAY_MS", "50");
        assert_eq!(env_parse_or("WHALEWATCH_TEST_DELAY_MS", 200u64), 50);
        std::env::remove_var("WHALEWATCH_TEST_DELAY_MS");
    }
}
