//! Collection pipeline.
//!
//! The sales-channel fixture runs first since the SEO-URL collectors
//! scope their queries to the selected channel. Properties, media, and
//! both SEO routes have no interdependencies and run concurrently; a
//! failure in any of them aborts the whole run. Keywords run after the
//! concurrent batch completes.

use crate::admin::AdminClient;
use crate::config::CollectorConfig;
use crate::fixtures::{self, FixtureError, FixtureWriter};

/// SEO route for category navigation pages.
const NAVIGATION_ROUTE: &str = "frontend.navigation.page";

/// SEO route for product detail pages.
const DETAIL_ROUTE: &str = "frontend.detail.page";

/// Run the full fixture collection against the configured shop.
///
/// # Errors
///
/// Returns the first [`FixtureError`] encountered; there is no
/// partial-result recovery or retry.
pub async fn run(config: &CollectorConfig) -> Result<(), FixtureError> {
    let client = AdminClient::new(config)?;
    let writer = FixtureWriter::new(config.fixtures_dir.clone()).await?;
    let api = config.api_profile();

    let channel = fixtures::sales_channel::collect(&client, &writer, &api).await?;

    tokio::try_join!(
        fixtures::catalog::collect_properties(&client, &writer),
        fixtures::catalog::collect_media(&client, &writer),
        fixtures::seo_url::collect(&client, &writer, &channel, NAVIGATION_ROUTE),
        fixtures::seo_url::collect(&client, &writer, &channel, DETAIL_ROUTE),
    )?;

    fixtures::keywords::collect(&client, &writer).await?;

    Ok(())
}
