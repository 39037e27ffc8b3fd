use std::io::{self, IsTerminal};

use bullion::BullionError;
use bullion::config::fetch_config;
use bullion::headless::print_snapshot;
use bullion::logging::init_tracing;
use bullion::oracle::PriceOracle;

#[tokio::main]
async fn main() -> Result<(), BullionError> {
    let config = fetch_config()?;
    init_tracing(&config.log)?;

    let oracle = PriceOracle::new(config.oracle.clone());

    if io::stdout().is_terminal() {
        bullion::tui::run(&config.refresh, oracle).await
    } else {
        print_snapshot(&oracle, &mut io::stdout().lock()).await?;
        Ok(())
    }
}
