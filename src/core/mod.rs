pub mod agents;
pub mod engine;
pub mod generators;
pub mod orchestrator;

pub use crate::domain::model::WorkflowResults;
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
