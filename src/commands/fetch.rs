//! One-shot aggregation
//!
//! Runs the same pipeline as `GET /api/data` once and prints the JSON body.
//!
//! Usage:
//! - `whalewatch fetch`
//! - `whalewatch fetch --compact`

use crate::error::Result;
use crate::models::AppConfig;
use crate::services::Aggregator;

pub async fn run(compact: bool) {
    if let Err(e) = fetch_and_print(compact).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn fetch_and_print(compact: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let aggregator = Aggregator::from_config(&config)?;

    let data = aggregator.collect().await;
    let json = if compact {
        serde_json::to_string(&data)?
    } else {
        serde_json::to_string_pretty(&data)?
    };

    println!("{}", json);
    Ok(())
}
