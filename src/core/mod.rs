//! Core types and traits for Streamroute.
//!
//! This module contains the vocabulary the rest of the crate is built on:
//! - Stream and transformer tags
//! - The transformer factory contract
//! - Error types

pub mod types;
pub mod error;
pub mod transformer;

// Re-export commonly used types
pub use types::{StreamType, TransformerKind};
pub use error::{EdgeId, GraphError, PlanError, StreamRouteError, TransformError};
pub use transformer::{AudioStream, FactoryRegistry, StreamInput, TransformerFactory};
