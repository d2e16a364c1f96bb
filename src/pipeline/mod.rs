//! Pipeline assembly and the planning entry point.

pub mod assembler;
pub mod planner;

// Re-export commonly used types
pub use assembler::{Pipeline, PipelineSummary};
pub use planner::{find_pipeline, Planner};
