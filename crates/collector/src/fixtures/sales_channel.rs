//! Sales-channel fixture.
//!
//! Queries active, non-"Headless" sales channels together with the global
//! salutation and tax id lists, merges them into per-channel records, and
//! selects the first record as the channel all downstream collectors
//! reference.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FixtureError, FixtureWriter};
use crate::admin::{AdminClient, Criteria, Filter};
use crate::config::ApiProfile;

const FILE_NAME: &str = "sales-channel.json";

/// Channel name excluded from collection.
const EXCLUDED_CHANNEL: &str = "Headless";

/// One exported sales-channel record.
///
/// Salutation and tax ids are global lists attached to every record (they
/// are not channel-scoped in the source API), and the API profile is
/// embedded by value so the consuming test suite can reach the same shop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesChannelFixture {
    pub id: String,
    pub name: String,
    pub access_key: String,
    /// URL of the channel's first domain.
    pub url: String,
    pub country_ids: Vec<String>,
    pub salutation_ids: Vec<String>,
    pub tax_ids: Vec<String>,
    pub api: ApiProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalesChannelRecord {
    id: String,
    name: String,
    access_key: String,
    #[serde(default)]
    domains: Vec<DomainRecord>,
    #[serde(default)]
    countries: Vec<CountryRecord>,
}

#[derive(Debug, Deserialize)]
struct DomainRecord {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    id: String,
}

/// Collect `sales-channel.json` and return the selected channel.
///
/// The first record of the filtered search becomes "the" sales channel
/// the SEO-URL collectors scope their queries to.
///
/// # Errors
///
/// Returns [`FixtureError::NoSalesChannel`] if the search matches nothing
/// and [`FixtureError::MissingDomain`] if a matched channel has no domain.
pub async fn collect(
    client: &AdminClient,
    writer: &FixtureWriter,
    api: &ApiProfile,
) -> Result<SalesChannelFixture, FixtureError> {
    let criteria = Criteria::new()
        .fields(["id", "name", "accessKey", "domains.url", "countries.id"])
        .filter(Filter::equals("active", true))
        .filter(Filter::not(vec![Filter::equals("name", EXCLUDED_CHANNEL)]));

    let records: Vec<SalesChannelRecord> = client.search("sales-channel", &criteria).await?;
    let salutation_ids = client.search_ids("salutation", &Criteria::new()).await?;
    let tax_ids = client.search_ids("tax", &Criteria::new()).await?;

    let fixtures = records
        .into_iter()
        .map(|record| into_fixture(record, &salutation_ids, &tax_ids, api))
        .collect::<Result<Vec<_>, _>>()?;

    writer.write(FILE_NAME, &fixtures).await?;
    info!("Collected {} sales channels", fixtures.len());
    info!("Collected {} salutations", salutation_ids.len());

    fixtures
        .into_iter()
        .next()
        .ok_or(FixtureError::NoSalesChannel)
}

fn into_fixture(
    record: SalesChannelRecord,
    salutation_ids: &[String],
    tax_ids: &[String],
    api: &ApiProfile,
) -> Result<SalesChannelFixture, FixtureError> {
    let Some(domain) = record.domains.into_iter().next() else {
        return Err(FixtureError::MissingDomain(record.id));
    };

    Ok(SalesChannelFixture {
        id: record.id,
        name: record.name,
        access_key: record.access_key,
        url: domain.url,
        country_ids: record.countries.into_iter().map(|c| c.id).collect(),
        salutation_ids: salutation_ids.to_vec(),
        tax_ids: tax_ids.to_vec(),
        api: api.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CredentialBundle;
    use serde_json::json;

    fn test_api_profile() -> ApiProfile {
        ApiProfile {
            base_url: "https://shop.example.com/api".to_string(),
            credentials: CredentialBundle {
                grant_type: "password",
                client_id: "administration",
                scopes: "write",
                username: "admin".to_string(),
                password: "shopware".to_string(),
            },
        }
    }

    fn test_record() -> SalesChannelRecord {
        SalesChannelRecord {
            id: "channel-1".to_string(),
            name: "Storefront".to_string(),
            access_key: "SWSC-KEY".to_string(),
            domains: vec![
                DomainRecord {
                    url: "https://shop.example.com".to_string(),
                },
                DomainRecord {
                    url: "https://shop.example.com/en".to_string(),
                },
            ],
            countries: vec![
                CountryRecord {
                    id: "country-1".to_string(),
                },
                CountryRecord {
                    id: "country-2".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_into_fixture_uses_first_domain() {
        let fixture = into_fixture(
            test_record(),
            &["sal-1".to_string()],
            &["tax-1".to_string()],
            &test_api_profile(),
        )
        .unwrap();

        assert_eq!(fixture.url, "https://shop.example.com");
        assert_eq!(fixture.country_ids, vec!["country-1", "country-2"]);
        assert_eq!(fixture.salutation_ids, vec!["sal-1"]);
        assert_eq!(fixture.tax_ids, vec!["tax-1"]);
    }

    #[test]
    fn test_into_fixture_fails_without_domain() {
        let mut record = test_record();
        record.domains.clear();

        let result = into_fixture(record, &[], &[], &test_api_profile());
        assert!(matches!(result, Err(FixtureError::MissingDomain(id)) if id == "channel-1"));
    }

    #[test]
    fn test_fixture_serialization_keys() {
        let fixture = into_fixture(
            test_record(),
            &["sal-1".to_string()],
            &["tax-1".to_string()],
            &test_api_profile(),
        )
        .unwrap();

        let value = serde_json::to_value(&fixture).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "channel-1",
                "name": "Storefront",
                "accessKey": "SWSC-KEY",
                "url": "https://shop.example.com",
                "countryIds": ["country-1", "country-2"],
                "salutationIds": ["sal-1"],
                "taxIds": ["tax-1"],
                "api": {
                    "baseURL": "https://shop.example.com/api",
                    "credentials": {
                        "grant_type": "password",
                        "client_id": "administration",
                        "scopes": "write",
                        "username": "admin",
                        "password": "shopware"
                    }
                }
            })
        );
    }

    #[test]
    fn test_record_deserializes_projected_response() {
        let record: SalesChannelRecord = serde_json::from_value(json!({
            "id": "channel-1",
            "name": "Storefront",
            "accessKey": "SWSC-KEY",
            "domains": [{"url": "https://shop.example.com"}],
            "countries": [{"id": "country-1"}]
        }))
        .unwrap();

        assert_eq!(record.access_key, "SWSC-KEY");
        assert_eq!(record.domains.len(), 1);
    }
}
