use crate::utils::error::{NodeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "generateRandomNumber")]
    GenerateRandomNumber,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GenerateRandomNumber => "generateRandomNumber",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generateRandomNumber" => Ok(Operation::GenerateRandomNumber),
            other => Err(NodeError::InvalidConfigValueError {
                field: "operation".to_string(),
                value: other.to_string(),
                reason: "Supported operations: generateRandomNumber".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Options,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    /// Whether the host should present this property for `operation`.
    pub fn is_shown_for(&self, operation: Operation) -> bool {
        match &self.display_options {
            None => true,
            Some(display) => display
                .show
                .get("operation")
                .map_or(true, |ops| ops.iter().any(|op| op == operation.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefaults {
    pub name: String,
}

/// Configuration surface the node declares to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn random() -> Self {
        let shown_for_generate = || DisplayOptions {
            show: HashMap::from([(
                "operation".to_string(),
                vec![Operation::GenerateRandomNumber.to_string()],
            )]),
        };

        Self {
            display_name: "Random".to_string(),
            name: "random".to_string(),
            icon: "file:random.svg".to_string(),
            group: vec!["transform".to_string()],
            version: 1,
            description: "Generates true random numbers using Random.org".to_string(),
            defaults: NodeDefaults {
                name: "Random".to_string(),
            },
            inputs: vec!["main".to_string()],
            outputs: vec!["main".to_string()],
            properties: vec![
                NodeProperty {
                    display_name: "Operation".to_string(),
                    name: "operation".to_string(),
                    kind: PropertyType::Options,
                    required: false,
                    default: json!(Operation::GenerateRandomNumber.as_str()),
                    description: None,
                    options: vec![PropertyOption {
                        name: "True Random Number Generator".to_string(),
                        value: Operation::GenerateRandomNumber.to_string(),
                        description: "Generate a truly random number".to_string(),
                    }],
                    display_options: None,
                },
                NodeProperty {
                    display_name: "Minimum Value".to_string(),
                    name: "min".to_string(),
                    kind: PropertyType::Number,
                    required: true,
                    default: json!(1),
                    description: Some("Lowest value the random number may take".to_string()),
                    options: vec![],
                    display_options: Some(shown_for_generate()),
                },
                NodeProperty {
                    display_name: "Maximum Value".to_string(),
                    name: "max".to_string(),
                    kind: PropertyType::Number,
                    required: true,
                    default: json!(100),
                    description: Some("Highest value the random number may take".to_string()),
                    options: vec![],
                    display_options: Some(shown_for_generate()),
                },
            ],
        }
    }

    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Default parameter values for the properties shown under `operation`.
    pub fn defaults_for(&self, operation: Operation) -> Map<String, Value> {
        self.properties
            .iter()
            .filter(|p| p.is_shown_for(operation))
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect()
    }
}
