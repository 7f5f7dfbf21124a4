use anyhow::{Context, Result};
use tracing::{info, warn};

use paged_harvester::{HarvestConfig, HarvestDriver, init_logging_with_config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = HarvestConfig::load().context("Failed to load configuration")?;

    init_logging_with_config(&config.logging).context("Failed to initialize logging")?;
    info!("Starting harvest of {}", config.target_url);

    let driver = HarvestDriver::from_config(&config).context("Failed to set up harvest driver")?;
    let report = driver.run().await;

    if !report.is_complete() {
        warn!("Pages left absent after this run: {:?}", report.failed_pages());
    }

    println!("{}", report.summary());
    Ok(())
}
