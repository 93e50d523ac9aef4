use crate::core::description::Operation;
use crate::core::random_node::{RandomNode, RANDOM_ORG_ENDPOINT, REQUEST_TIMEOUT_MS, USER_AGENT};
use crate::utils::error::{NodeError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub node: NodeSection,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSection {
    #[serde(default = "default_node_name")]
    pub name: String,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            name: default_node_name(),
        }
    }
}

/// Parameter values as the host would hold them: numbers, or strings such
/// as `"{{ $json.lower }}"` that are resolved per item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParametersConfig {
    pub operation: Option<Operation>,
    pub min: Option<toml::Value>,
    pub max: Option<toml::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub continue_on_fail: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_node_name() -> String {
    "Random".to_string()
}

fn default_endpoint() -> String {
    RANDOM_ORG_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    REQUEST_TIMEOUT_MS
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl NodeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Non-empty parameters as JSON values, ready for an execution context.
    pub fn parameter_map(&self) -> Result<Map<String, Value>> {
        let mut parameters = Map::new();
        if let Some(operation) = self.parameters.operation {
            parameters.insert("operation".to_string(), Value::from(operation.as_str()));
        }
        if let Some(min) = &self.parameters.min {
            parameters.insert("min".to_string(), toml_to_json("parameters.min", min)?);
        }
        if let Some(max) = &self.parameters.max {
            parameters.insert("max".to_string(), toml_to_json("parameters.max", max)?);
        }
        Ok(parameters)
    }

    pub fn build_node(&self) -> RandomNode {
        RandomNode::new()
            .with_endpoint(self.http.endpoint.clone())
            .with_timeout_ms(self.http.timeout_ms)
            .with_user_agent(self.http.user_agent.clone())
    }
}

fn toml_to_json(field: &str, value: &toml::Value) -> Result<Value> {
    match value {
        toml::Value::Integer(i) => Ok(Value::from(*i)),
        toml::Value::Float(f) => Ok(Value::from(*f)),
        toml::Value::String(s) => Ok(Value::from(s.clone())),
        other => Err(NodeError::InvalidConfigValueError {
            field: field.to_string(),
            value: other.to_string(),
            reason: "expected a number or an item reference".to_string(),
        }),
    }
}

impl Validate for NodeConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("node.name", &self.node.name)?;
        validate_url("http.endpoint", &self.http.endpoint)?;
        validate_positive_number("http.timeout_ms", self.http.timeout_ms, 1)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        self.parameter_map()?;

        tracing::debug!("✅ Node configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = NodeConfig::from_toml_str("").unwrap();

        assert_eq!(config.node.name, "Random");
        assert_eq!(config.http.endpoint, "https://www.random.org/integers/");
        assert_eq!(config.http.timeout_ms, 10000);
        assert_eq!(config.http.user_agent, "n8n-random-node/1.0.0");
        assert!(!config.execution.continue_on_fail);
        assert!(config.parameter_map().unwrap().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = NodeConfig::from_toml_str(
            r#"
[node]
name = "Dice"

[parameters]
operation = "generateRandomNumber"
min = 1
max = "{{ $json.sides }}"

[execution]
continue_on_fail = true

[http]
endpoint = "http://localhost:9000/integers/"
timeout_ms = 2500
"#,
        )
        .unwrap();

        assert_eq!(config.node.name, "Dice");
        assert!(config.execution.continue_on_fail);
        assert_eq!(config.http.timeout_ms, 2500);

        let params = config.parameter_map().unwrap();
        assert_eq!(params["operation"], json!("generateRandomNumber"));
        assert_eq!(params["min"], json!(1));
        assert_eq!(params["max"], json!("{{ $json.sides }}"));

        let node = config.build_node();
        assert_eq!(node.endpoint(), "http://localhost:9000/integers/");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RANDOM_NODE_TEST_ENDPOINT", "https://mirror.example.com/integers/");
        let config = NodeConfig::from_toml_str(
            r#"
[http]
endpoint = "${RANDOM_NODE_TEST_ENDPOINT}"
"#,
        )
        .unwrap();
        assert_eq!(config.http.endpoint, "https://mirror.example.com/integers/");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = NodeConfig::default();
        config.http.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.http.timeout_ms = 0;
        assert!(config.validate().is_err());

        let config = NodeConfig::from_toml_str("[parameters]\nmin = true\n").unwrap();
        assert!(config.validate().is_err());

        assert!(NodeConfig::from_toml_str("[parameters]\noperation = \"shuffle\"\n").is_err());
    }
}
