pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{LocalExecutionContext, ReqwestHttpClient};
pub use crate::config::NodeConfig;
pub use crate::core::{description::NodeDescription, engine::NodeEngine, random_node::RandomNode};
pub use crate::domain::model::{Item, PairedItem};
pub use crate::utils::error::{NodeError, NodeOperationError, Result};
