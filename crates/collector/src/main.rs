//! Fixture collector binary.
//!
//! Authenticates against the shop's admin API and dumps the JSON fixture
//! files consumed by the end-to-end test suite into the fixtures
//! directory, overwriting any previous versions.
//!
//! # Usage
//!
//! ```bash
//! SHOP_URL=https://shop.example.com \
//! SHOP_ADMIN_USERNAME=admin \
//! SHOP_ADMIN_PASSWORD=... \
//! collect-fixtures
//! ```
//!
//! There are no flags; configuration comes entirely from the environment
//! (see [`shopware_fixture_collector::config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopware_fixture_collector::collect;
use shopware_fixture_collector::config::CollectorConfig;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!("Fixture collection failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CollectorConfig::from_env()?;
    collect::run(&config).await?;
    Ok(())
}
