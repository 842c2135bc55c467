//! Club API server binary

use club_api::{ApiConfig, ClubApi};
use payment_gateway::HttpGateway;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Club API Server");

    // Load configuration
    let config = match std::env::var("CLUB_CONFIG") {
        Ok(path) => ApiConfig::from_file(path)?,
        Err(_) => ApiConfig::from_env()?,
    };

    let gateway = Arc::new(HttpGateway::new(config.gateway.clone())?);
    let api = ClubApi::new(config, gateway);
    tracing::info!(players = api.users().len(), "Club API wired");

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down club API server");
    Ok(())
}
