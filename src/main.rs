//! Megaverse builder
//!
//! Loads `config.json`, fetches the candidate's goal map and places every
//! polyanet, soloon and cometh it describes.

use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use megaverse::{ConfigLoader, Driver, HttpMegaverseClient, MegaverseConfig};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("megaverse=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

async fn build(config: MegaverseConfig) -> Result<()> {
    let client = Arc::new(HttpMegaverseClient::new(&config.api_base_url)?);
    let driver = Driver::new(client, config);

    match driver.run().await {
        Ok(report) if report.is_clean() => info!("Megaverse complete"),
        Ok(_) => info!("Megaverse pass finished with failures; rerun to fill the gaps"),
        Err(e) => error!("{}", e),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_logging();

    let loader = ConfigLoader::from_env();
    let config = match loader.load().await {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Building megaverse for candidate {} against {}",
        config.candidate_id, config.api_base_url
    );

    if let Err(e) = build(config).await {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
