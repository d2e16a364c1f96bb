//! Error types for Streamroute.
//!
//! Uses thiserror for structured errors with context. Planning failures are
//! split in two: programmer errors against the graph (`GraphError`) and the
//! expected "nothing fits" outcome of a search (`PlanError::NoViablePipeline`).

use crate::core::types::{StreamType, TransformerKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Index of an edge in the transformation graph's edge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Position of the edge in the edge table.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Top-level error type for Streamroute.
#[derive(Error, Debug)]
pub enum StreamRouteError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Transformer error: {0}")]
    Transform(#[from] TransformError),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to graph structure and lookups.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphError {
    #[error("Node type '{0}' does not exist")]
    UnknownStreamType(StreamType),

    #[error("Unknown stream type name '{0}'")]
    UnknownStreamName(String),

    #[error("Invalid cost {cost} for {kind}: costs must be finite and non-negative")]
    InvalidCost { kind: TransformerKind, cost: f64 },

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Path is not contiguous: expected to be at {expected}, found {found}")]
    BrokenPath {
        expected: StreamType,
        found: StreamType,
    },
}

/// Errors from pipeline planning.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanError {
    #[error("No viable pipeline from {from} to {goal} within {max_depth} transformers")]
    NoViablePipeline {
        from: StreamType,
        goal: StreamType,
        max_depth: usize,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors raised while instantiating transformers.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("No implementation registered for {0}")]
    Unavailable(TransformerKind),

    #[error("Resource '{0}' cannot be played without a transformer to open it")]
    UnresolvedResource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Error Utilities
// ============================================================================

impl PlanError {
    /// Whether the caller can sensibly react, e.g. by relaxing its constraint
    /// or rejecting the source. Graph errors are bugs in the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PlanError::NoViablePipeline { .. })
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            PlanError::NoViablePipeline { from, .. } if *from == StreamType::Arbitrary => Some(
                "Inspect the source and declare its stream type instead of 'arbitrary'".to_string(),
            ),
            PlanError::NoViablePipeline { max_depth, .. } => Some(format!(
                "Relax the constraint or raise the depth budget above {}",
                max_depth
            )),
            PlanError::Graph(GraphError::UnknownStreamType(t)) => {
                Some(format!("Register a node for '{}' before planning", t))
            }
            _ => None,
        }
    }
}

/// Result type alias for Streamroute operations.
pub type StreamRouteResult<T> = Result<T, StreamRouteError>;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
