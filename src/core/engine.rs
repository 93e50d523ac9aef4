use crate::core::{ExecutionContext, Item, NodeType};
use crate::utils::error::NodeOperationError;
use std::time::Instant;

/// Host-side entry point: runs a node once and reports failures under the
/// executing node's name.
pub struct NodeEngine<N: NodeType> {
    node: N,
}

impl<N: NodeType> NodeEngine<N> {
    pub fn new(node: N) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub async fn run<C: ExecutionContext>(
        &self,
        ctx: &C,
    ) -> std::result::Result<Vec<Vec<Item>>, NodeOperationError> {
        let started = Instant::now();
        let node_name = ctx.node().name.clone();

        match self.node.execute(ctx).await {
            Ok(output) => {
                let produced: usize = output.iter().map(Vec::len).sum();
                tracing::info!(
                    "📊 {} finished in {:?}: {} item(s)",
                    node_name,
                    started.elapsed(),
                    produced
                );
                Ok(output)
            }
            Err(e) => {
                let err = NodeOperationError::new(node_name, e);
                if err.source.is_item_error() {
                    tracing::error!(
                        "❌ {} aborted after {:?} (item {:?}): {}",
                        err.node,
                        started.elapsed(),
                        err.item_index(),
                        err
                    );
                } else {
                    tracing::error!(
                        "❌ {} failed before producing output after {:?}: {}",
                        err.node,
                        started.elapsed(),
                        err
                    );
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::NodeDescription;
    use crate::domain::model::{HttpRequestOptions, NodeInfo};
    use crate::utils::error::{NodeError, Result};
    use serde_json::{json, Map, Value};

    struct StaticContext {
        items: Vec<Item>,
        node: NodeInfo,
    }

    #[async_trait::async_trait]
    impl ExecutionContext for StaticContext {
        fn input_data(&self) -> &[Item] {
            &self.items
        }

        fn node_parameter(&self, _name: &str, _item_index: usize) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn http_request(&self, _options: &HttpRequestOptions) -> Result<Value> {
            Ok(json!("1"))
        }

        fn continue_on_fail(&self) -> bool {
            false
        }

        fn node(&self) -> &NodeInfo {
            &self.node
        }
    }

    struct EchoNode {
        fail: Option<fn() -> NodeError>,
    }

    #[async_trait::async_trait]
    impl NodeType for EchoNode {
        type Description = NodeDescription;

        fn description(&self) -> NodeDescription {
            NodeDescription::random()
        }

        async fn execute<C: ExecutionContext>(&self, ctx: &C) -> Result<Vec<Vec<Item>>> {
            if let Some(failure) = self.fail {
                return Err(failure());
            }
            Ok(vec![ctx.input_data().to_vec()])
        }
    }

    fn context() -> StaticContext {
        StaticContext {
            items: vec![Item::new(Map::new())],
            node: NodeInfo::new("Random 1"),
        }
    }

    #[tokio::test]
    async fn test_run_passes_output_through() {
        let engine = NodeEngine::new(EchoNode { fail: None });
        let output = engine.run(&context()).await.unwrap();
        assert_eq!(output, vec![vec![Item::new(Map::new())]]);
    }

    #[test]
    fn test_run_tags_failure_with_node_name() {
        let engine = NodeEngine::new(EchoNode {
            fail: Some(|| NodeError::ValidationError {
                item_index: 0,
                message: "boom".to_string(),
            }),
        });
        let err = tokio_test::block_on(engine.run(&context())).unwrap_err();

        assert_eq!(err.node, "Random 1");
        assert_eq!(err.item_index(), Some(0));
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_run_wraps_non_item_failure_without_index() {
        let engine = NodeEngine::new(EchoNode {
            fail: Some(|| NodeError::ConfigError {
                message: "endpoint missing".to_string(),
            }),
        });
        let err = engine.run(&context()).await.unwrap_err();

        assert!(!err.source.is_item_error());
        assert_eq!(err.item_index(), None);
        assert_eq!(err.node, "Random 1");
        assert_eq!(err.to_string(), "Configuration error: endpoint missing");
    }
}
