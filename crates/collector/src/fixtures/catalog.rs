//! Media and property-group-option id fixtures.
//!
//! Both are flat id lists with no filter beyond the shared result limit.

use tracing::info;

use super::{DEFAULT_LIMIT, FixtureError, FixtureWriter};
use crate::admin::{AdminClient, Criteria};

/// Collect `media.json`: up to [`DEFAULT_LIMIT`] media ids.
///
/// # Errors
///
/// Returns [`FixtureError`] if the query or the file write fails.
pub async fn collect_media(
    client: &AdminClient,
    writer: &FixtureWriter,
) -> Result<(), FixtureError> {
    let ids = client
        .search_ids("media", &Criteria::new().limit(DEFAULT_LIMIT))
        .await?;

    writer.write("media.json", &ids).await?;
    info!("Collected {} media ids", ids.len());
    Ok(())
}

/// Collect `property_group_option.json`: up to [`DEFAULT_LIMIT`]
/// property-group-option ids.
///
/// # Errors
///
/// Returns [`FixtureError`] if the query or the file write fails.
pub async fn collect_properties(
    client: &AdminClient,
    writer: &FixtureWriter,
) -> Result<(), FixtureError> {
    let ids = client
        .search_ids("property-group-option", &Criteria::new().limit(DEFAULT_LIMIT))
        .await?;

    writer.write("property_group_option.json", &ids).await?;
    info!("Collected {} property ids", ids.len());
    Ok(())
}
