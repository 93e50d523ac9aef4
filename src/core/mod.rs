pub mod description;
pub mod engine;
pub mod random_node;

pub use crate::domain::model::{Bounds, Item, PairedItem};
pub use crate::domain::ports::{ExecutionContext, HttpClient, NodeType};
pub use crate::utils::error::Result;
