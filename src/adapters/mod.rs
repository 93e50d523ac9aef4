// Adapters layer: concrete host capabilities for running the node locally.

pub mod host;
pub mod http;

pub use host::{parse_items, LocalExecutionContext};
pub use http::ReqwestHttpClient;
