//! Graph module for the stream type transformation graph.
//!
//! Vertices are stream types, edges are transformers with a relative cost.
//! Unlike a processing pipeline the graph may contain cycles (decoding and
//! re-encoding, or a filter that maps a type onto itself).

pub mod structure;
pub mod builtin;
pub mod topology;

// Re-export commonly used types
pub use structure::{Edge, GraphBuilder, Node, SharedGraph, TransformerGraph};
pub use builtin::STANDARD_EDGES;
pub use topology::TopologyAnalyzer;
