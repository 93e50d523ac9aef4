use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("{message}")]
    ValidationError { item_index: usize, message: String },

    #[error("{message}")]
    ParseError { item_index: usize, message: String },

    #[error("{message}")]
    TransportError {
        item_index: Option<usize>,
        message: String,
    },

    #[error("Could not resolve parameter '{name}' for item {item_index}: {reason}")]
    ParameterError {
        item_index: usize,
        name: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        NodeError::TransportError {
            item_index: None,
            message: err.to_string(),
        }
    }
}

impl NodeError {
    /// Index of the input item the failure belongs to, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            NodeError::ValidationError { item_index, .. }
            | NodeError::ParseError { item_index, .. }
            | NodeError::ParameterError { item_index, .. } => Some(*item_index),
            NodeError::TransportError { item_index, .. } => *item_index,
            _ => None,
        }
    }

    /// Attaches an item index to errors raised without one (transport failures).
    pub fn with_item_index(self, index: usize) -> Self {
        match self {
            NodeError::TransportError {
                item_index: None,
                message,
            } => NodeError::TransportError {
                item_index: Some(index),
                message,
            },
            other => other,
        }
    }

    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            NodeError::ValidationError { .. }
                | NodeError::ParseError { .. }
                | NodeError::TransportError { .. }
                | NodeError::ParameterError { .. }
        )
    }
}

/// Failure report handed to the host, naming the node that raised it.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct NodeOperationError {
    pub node: String,
    #[source]
    pub source: NodeError,
}

impl NodeOperationError {
    pub fn new(node: impl Into<String>, source: NodeError) -> Self {
        Self {
            node: node.into(),
            source,
        }
    }

    pub fn item_index(&self) -> Option<usize> {
        self.source.item_index()
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_errors_display_bare_message() {
        let err = NodeError::ValidationError {
            item_index: 3,
            message: "Minimum value (5) cannot be greater than maximum value (1)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Minimum value (5) cannot be greater than maximum value (1)"
        );
        assert_eq!(err.item_index(), Some(3));
    }

    #[test]
    fn test_with_item_index_only_fills_missing_transport_index() {
        let err = NodeError::TransportError {
            item_index: None,
            message: "Network error".to_string(),
        }
        .with_item_index(2);
        assert_eq!(err.item_index(), Some(2));
        assert_eq!(err.to_string(), "Network error");

        let tagged = NodeError::TransportError {
            item_index: Some(0),
            message: "timeout".to_string(),
        }
        .with_item_index(7);
        assert_eq!(tagged.item_index(), Some(0));

        let config = NodeError::ConfigError {
            message: "bad".to_string(),
        }
        .with_item_index(1);
        assert_eq!(config.item_index(), None);
        assert!(!config.is_item_error());
    }

    #[test]
    fn test_node_operation_error_keeps_message() {
        let err = NodeOperationError::new(
            "Random",
            NodeError::ParseError {
                item_index: 0,
                message: "Could not extract a number from response: invalid".to_string(),
            },
        );
        assert_eq!(err.node, "Random");
        assert_eq!(err.item_index(), Some(0));
        assert_eq!(
            err.to_string(),
            "Could not extract a number from response: invalid"
        );
    }
}
