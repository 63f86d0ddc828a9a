use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a workspace, report or dataset listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedObject {
    pub id: String,
    pub name: String,
}

impl NamedObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Extract the entries of an OData `{"value": [...]}` listing.
///
/// Entries without a string `id` and `name` are skipped; a body without a
/// `value` array is an empty listing.
pub fn listing_entries(body: &Value) -> Vec<NamedObject> {
    body.get("value")
        .and_then(|value| value.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| NamedObject::deserialize(entry).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Body of the report rebind call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebindRequest {
    #[serde(rename = "datasetId")]
    pub dataset_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_entries() {
        let body = json!({
            "@odata.context": "https://api.powerbi.com/v1.0/myorg/$metadata#groups",
            "value": [
                {"id": "1", "name": "Dev", "isReadOnly": false},
                {"id": "2"},
                {"name": "orphan"},
                {"id": "3", "name": "Test"}
            ]
        });

        let entries = listing_entries(&body);
        assert_eq!(entries, vec![NamedObject::new("1", "Dev"), NamedObject::new("3", "Test")]);
    }

    #[test]
    fn test_listing_without_value() {
        assert!(listing_entries(&json!({})).is_empty());
        assert!(listing_entries(&json!({"value": "oops"})).is_empty());
    }

    #[test]
    fn test_rebind_request_body() {
        let body = serde_json::to_value(RebindRequest {
            dataset_id: "ds-1".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"datasetId": "ds-1"}));
    }
}
