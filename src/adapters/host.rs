use crate::core::description::{NodeDescription, Operation};
use crate::domain::model::{HttpRequestOptions, Item, NodeInfo};
use crate::domain::ports::{ExecutionContext, HttpClient};
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn field_reference() -> &'static Regex {
    static REFERENCE: OnceLock<Regex> = OnceLock::new();
    REFERENCE.get_or_init(|| {
        Regex::new(r"^\s*\{\{\s*\$json\.([A-Za-z0-9_.]+)\s*\}\}\s*$")
            .expect("reference pattern is valid")
    })
}

/// Parses input records from JSON. Accepts an array of host items
/// (`{"json": {...}}`), an array of plain objects, or a single object.
pub fn parse_items(content: &str) -> Result<Vec<Item>> {
    let value: Value = serde_json::from_str(content)?;
    let records = match value {
        Value::Array(records) => records,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(NodeError::InvalidConfigValueError {
                field: "input".to_string(),
                value: other.to_string(),
                reason: "expected a JSON array of records".to_string(),
            })
        }
    };

    records
        .into_iter()
        .map(|record| {
            if matches!(&record, Value::Object(obj) if is_host_item(obj)) {
                Ok(serde_json::from_value::<Item>(record)?)
            } else {
                Item::from_value(record)
            }
        })
        .collect()
}

fn is_host_item(obj: &Map<String, Value>) -> bool {
    matches!(obj.get("json"), Some(Value::Object(_)))
        && obj.keys().all(|k| k == "json" || k == "pairedItem")
}

/// Runs a node outside a workflow engine: items and parameters are held in
/// memory and HTTP goes through the supplied client.
pub struct LocalExecutionContext<H: HttpClient> {
    items: Vec<Item>,
    parameters: Map<String, Value>,
    http: H,
    continue_on_fail: bool,
    node: NodeInfo,
}

impl<H: HttpClient> LocalExecutionContext<H> {
    pub fn new(items: Vec<Item>, http: H) -> Self {
        Self {
            items,
            parameters: NodeDescription::random().defaults_for(Operation::GenerateRandomNumber),
            http,
            continue_on_fail: false,
            node: NodeInfo::new(NodeDescription::random().defaults.name),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    pub fn with_node_name(mut self, name: impl Into<String>) -> Self {
        self.node = NodeInfo::new(name);
        self
    }
}

#[async_trait]
impl<H: HttpClient> ExecutionContext for LocalExecutionContext<H> {
    fn input_data(&self) -> &[Item] {
        &self.items
    }

    /// Resolves `name` for the item at `item_index`. String values of the
    /// form `{{ $json.field }}` are read from that item's payload.
    fn node_parameter(&self, name: &str, item_index: usize) -> Result<Value> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| NodeError::ParameterError {
                item_index,
                name: name.to_string(),
                reason: "parameter is not set".to_string(),
            })?;

        let Value::String(raw) = value else {
            return Ok(value.clone());
        };
        let Some(caps) = field_reference().captures(raw) else {
            return Ok(value.clone());
        };

        let path = &caps[1];
        self.items
            .get(item_index)
            .and_then(|item| item.field(path))
            .cloned()
            .ok_or_else(|| NodeError::ParameterError {
                item_index,
                name: name.to_string(),
                reason: format!("field '{}' not found in item", path),
            })
    }

    async fn http_request(&self, options: &HttpRequestOptions) -> Result<Value> {
        self.http.request(options).await
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn node(&self) -> &NodeInfo {
        &self.node
    }
}
