use crate::models::AppConfig;
use crate::server::{self, AppState};
use crate::services::Aggregator;
use std::sync::Arc;
use tracing::{error, info};

pub async fn run(port: Option<u16>) {
    let config = AppConfig::from_env().with_port(port);

    info!("Starting whalewatch on port {}", config.port);
    info!("Block fetch delay: {:?}", config.block_fetch_delay);
    info!("Upstreams: {:?}", config.upstreams);

    let aggregator = match Aggregator::from_config(&config) {
        Ok(aggregator) => Arc::new(aggregator),
        Err(e) => {
            error!("Failed to initialize upstream client: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(aggregator, config.public_dir.clone());

    if let Err(e) = server::serve(app_state, config.port).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
