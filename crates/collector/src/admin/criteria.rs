//! Search criteria for the admin API.
//!
//! The search endpoints accept a JSON body with a field projection, a
//! filter tree, and a result limit. Only the filter types the collectors
//! use are modeled: `equals` and `not`.

use serde::Serialize;
use serde_json::Value;

/// Criteria sent to `/search/{entity}` and `/search-ids/{entity}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Criteria {
    /// Fields to project into the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Filter tree; top-level entries are ANDed by the API.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Filter>,
    /// Upper bound on the number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A node in the admin API filter tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    /// Match records whose `field` equals `value`.
    Equals { field: String, value: Value },
    /// Negate the nested queries.
    Not { queries: Vec<Filter> },
}

impl Criteria {
    /// Create empty criteria: no projection, no filter, API default limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Project only the given fields into the response.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a filter node.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Filter {
    /// Equality filter on a field.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Negation of the nested queries.
    #[must_use]
    pub fn not(queries: Vec<Self>) -> Self {
        Self::Not { queries }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_criteria_serializes_to_empty_object() {
        let json = serde_json::to_value(Criteria::new()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_equals_filter_wire_format() {
        let json = serde_json::to_value(Filter::equals("active", true)).unwrap();
        assert_eq!(json, json!({"type": "equals", "field": "active", "value": true}));
    }

    #[test]
    fn test_not_filter_wraps_queries() {
        let filter = Filter::not(vec![Filter::equals("name", "Headless")]);
        let json = serde_json::to_value(filter).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "not",
                "queries": [{"type": "equals", "field": "name", "value": "Headless"}]
            })
        );
    }

    #[test]
    fn test_full_criteria_wire_format() {
        let criteria = Criteria::new()
            .fields(["id", "name"])
            .filter(Filter::equals("active", true))
            .limit(500);
        let json = serde_json::to_value(criteria).unwrap();
        assert_eq!(
            json,
            json!({
                "fields": ["id", "name"],
                "filter": [{"type": "equals", "field": "active", "value": true}],
                "limit": 500
            })
        );
    }
}
