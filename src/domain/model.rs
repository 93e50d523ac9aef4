use crate::utils::error::{NodeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One unit of workflow data: an opaque JSON object plus the index of the
/// input item it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

impl Item {
    pub fn new(json: Map<String, Value>) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    /// Builds an item from a JSON value. Objects become the payload as-is;
    /// anything else is an error since records are key/value mappings.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(json) => Ok(Self::new(json)),
            other => Err(NodeError::InvalidConfigValueError {
                field: "input".to_string(),
                value: other.to_string(),
                reason: "input records must be JSON objects".to_string(),
            }),
        }
    }

    /// Fresh item holding `base` overlaid by `overlay`, tagged with `index`.
    pub fn merged(base: &Map<String, Value>, overlay: Map<String, Value>, index: usize) -> Self {
        let mut json = base.clone();
        json.extend(overlay);
        Self {
            json,
            paired_item: Some(PairedItem { item: index }),
        }
    }

    /// Looks up a dotted field path such as `limits.lower`.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.json.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Object(obj) => obj.get(part)?,
                Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// Inclusive range requested for the random integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, item_index: usize) -> Result<()> {
        if self.min > self.max {
            return Err(NodeError::ValidationError {
                item_index,
                message: format!(
                    "Minimum value ({}) cannot be greater than maximum value ({})",
                    self.min, self.max
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// Request handed to the host's HTTP capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestOptions {
    pub method: HttpMethod,
    pub url: String,
    pub timeout_ms: u64,
    pub headers: HashMap<String, String>,
}

/// Identity of the node instance, used to tag failure reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
}

impl NodeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(1, 100).validate(0).is_ok());
        assert!(Bounds::new(1, 1).validate(0).is_ok());
        assert!(Bounds::new(-10, 10).validate(0).is_ok());

        let err = Bounds::new(100, 1).validate(4).unwrap_err();
        assert_eq!(err.item_index(), Some(4));
        let message = err.to_string();
        assert!(message.contains("100"));
        assert!(message.contains("1"));
        assert!(message.contains("maximum"));
    }

    #[test]
    fn test_merged_overlays_without_mutating_base() {
        let base = object(json!({"id": 1, "min": "user"}));
        let overlay = object(json!({"min": 5, "randomNumber": 7}));

        let item = Item::merged(&base, overlay, 2);

        assert_eq!(item.json["id"], json!(1));
        assert_eq!(item.json["min"], json!(5));
        assert_eq!(item.json["randomNumber"], json!(7));
        assert_eq!(item.paired_item, Some(PairedItem { item: 2 }));
        assert_eq!(base["min"], json!("user"));
    }

    #[test]
    fn test_field_path_lookup() {
        let item = Item::new(object(json!({
            "lower": 3,
            "limits": {"upper": 9, "list": [1, 2]}
        })));

        assert_eq!(item.field("lower"), Some(&json!(3)));
        assert_eq!(item.field("limits.upper"), Some(&json!(9)));
        assert_eq!(item.field("limits.list.1"), Some(&json!(2)));
        assert_eq!(item.field("limits.missing"), None);
        assert_eq!(item.field("lower.deeper"), None);
    }

    #[test]
    fn test_item_serialization_shape() {
        let item = Item::merged(&Map::new(), object(json!({"a": 1})), 0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"json": {"a": 1}, "pairedItem": {"item": 0}}));

        let untagged: Item = serde_json::from_value(json!({"json": {"b": true}})).unwrap();
        assert_eq!(untagged.paired_item, None);
        assert!(Item::from_value(json!([1, 2])).is_err());
    }
}
