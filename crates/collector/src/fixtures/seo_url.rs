//! SEO-URL fixtures, one file per route name.
//!
//! Only canonical, non-deleted entries scoped to the selected sales
//! channel are exported; the channel's domain URL and the entry's path
//! are joined into a fully qualified URL.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::sales_channel::SalesChannelFixture;
use super::{DEFAULT_LIMIT, FixtureError, FixtureWriter};
use crate::admin::{AdminClient, Criteria, Filter};

/// One exported SEO-URL record: the fully qualified URL and the id of the
/// entity (product or navigation node) it points at.
#[derive(Debug, Clone, Serialize)]
pub struct SeoUrlFixture {
    pub url: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeoUrlRecord {
    seo_path_info: String,
    foreign_key: String,
}

/// Collect `seo-<route_name>.json` for the given route, scoped to the
/// selected sales channel.
///
/// # Errors
///
/// Returns [`FixtureError`] if the query or the file write fails.
pub async fn collect(
    client: &AdminClient,
    writer: &FixtureWriter,
    channel: &SalesChannelFixture,
    route_name: &str,
) -> Result<(), FixtureError> {
    let criteria = Criteria::new()
        .fields(["seoPathInfo", "foreignKey"])
        .filter(Filter::equals("routeName", route_name))
        .filter(Filter::equals("isCanonical", true))
        .filter(Filter::equals("isDeleted", false))
        .filter(Filter::equals("salesChannelId", channel.id.as_str()))
        .limit(DEFAULT_LIMIT);

    let records: Vec<SeoUrlRecord> = client.search("seo-url", &criteria).await?;

    let fixtures: Vec<SeoUrlFixture> = records
        .into_iter()
        .map(|record| into_fixture(record, &channel.url))
        .collect();

    writer
        .write(&format!("seo-{route_name}.json"), &fixtures)
        .await?;
    info!("Collected {} seo urls for {}", fixtures.len(), route_name);
    Ok(())
}

fn into_fixture(record: SeoUrlRecord, channel_url: &str) -> SeoUrlFixture {
    SeoUrlFixture {
        url: format!("{channel_url}/{}", record.seo_path_info),
        id: record.foreign_key,
    }
}
