//! Product search-keyword fixture.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::info;

use super::{DEFAULT_LIMIT, FixtureError, FixtureWriter};
use crate::admin::{AdminClient, Criteria};

#[derive(Debug, Deserialize)]
struct KeywordRecord {
    keyword: String,
}

/// Collect `keywords.json`: deduplicated search keywords in
/// first-occurrence order.
///
/// # Errors
///
/// Returns [`FixtureError`] if the query or the file write fails.
pub async fn collect(client: &AdminClient, writer: &FixtureWriter) -> Result<(), FixtureError> {
    let records: Vec<KeywordRecord> = client
        .search(
            "product-search-keyword",
            &Criteria::new().limit(DEFAULT_LIMIT),
        )
        .await?;

    let keywords = dedupe(records.into_iter().map(|record| record.keyword));

    writer.write("keywords.json", &keywords).await?;
    info!("Collected {} search keywords", keywords.len());
    Ok(())
}

/// Drop duplicate keywords, keeping the first occurrence of each value.
fn dedupe(keywords: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords.filter(|keyword| seen.insert(keyword.clone())).collect()
}
