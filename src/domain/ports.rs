use crate::domain::model::{HttpRequestOptions, Item, NodeInfo};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound HTTP capability. Returns the response body; plain text bodies
/// come back as `Value::String`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(&self, options: &HttpRequestOptions) -> Result<Value>;
}

/// Everything a node may ask of its host while executing.
#[async_trait]
pub trait ExecutionContext: Send + Sync {
    fn input_data(&self) -> &[Item];
    fn node_parameter(&self, name: &str, item_index: usize) -> Result<Value>;
    async fn http_request(&self, options: &HttpRequestOptions) -> Result<Value>;
    fn continue_on_fail(&self) -> bool;
    fn node(&self) -> &NodeInfo;
}

#[async_trait]
pub trait NodeType: Send + Sync {
    type Description;

    fn description(&self) -> Self::Description;
    async fn execute<C: ExecutionContext>(&self, ctx: &C) -> Result<Vec<Vec<Item>>>;
}
