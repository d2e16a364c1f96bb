//! # Streamroute - Audio Transformer Pipeline Planning
//!
//! Streamroute decides which transformers (demuxers, decoders, filters,
//! encoders) an audio source has to pass through before a voice connection
//! can send it, and in which order.
//!
//! ## Features
//!
//! - **Transformation Graph**: Stream types as vertices, costed transformers as edges
//! - **Constrained Search**: Cheapest path subject to a caller predicate (e.g. "must apply volume")
//! - **Pipeline Assembly**: Ordered, instantiable stage list with factories attached
//! - **Shareable**: The graph is immutable after build; planning is stateless and thread-safe
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use streamroute::prelude::*;
//!
//! // Build the graph once at startup and share it
//! let planner = Planner::standard()?;
//!
//! // Raw PCM that should be volume-controllable
//! let pipeline = planner.find_pipeline(StreamType::Raw, &constraint::volume(true))?;
//! assert_eq!(
//!     pipeline.kinds(),
//!     vec![TransformerKind::InlineVolume, TransformerKind::OpusEncoder]
//! );
//!
//! // Opus in an Ogg container, no volume needed
//! let pipeline = planner.find_pipeline(StreamType::OggOpus, &constraint::always())?;
//! let playable = pipeline.instantiate(StreamInput::from("track.ogg"))?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Stream/transformer tags, the factory contract, and errors
//! - [`graph`]: Graph structure, the standard topology, and topology analysis
//! - [`search`]: Constrained minimum-cost path search and constraint helpers
//! - [`pipeline`]: Pipeline assembly and the [`Planner`](pipeline::Planner) entry point
//! - [`config`]: TOML configuration for the planner

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod graph;
pub mod pipeline;
pub mod search;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use streamroute::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{StreamType, TransformerKind};

    // Transformer contract
    pub use crate::core::transformer::{
        AudioStream, FactoryRegistry, StreamInput, TransformerFactory,
    };

    // Errors
    pub use crate::core::error::{
        EdgeId, GraphError, PlanError, StreamRouteError, StreamRouteResult, TransformError,
    };

    // Graph
    pub use crate::graph::structure::{Edge, GraphBuilder, Node, SharedGraph, TransformerGraph};
    pub use crate::graph::topology::TopologyAnalyzer;

    // Search
    pub use crate::search::constraint::{self, SharedConstraint};
    pub use crate::search::path::{find_path, Path, SearchOptions, SearchStats, MAX_SEARCH_DEPTH};

    // Pipeline
    pub use crate::pipeline::assembler::{Pipeline, PipelineSummary};
    pub use crate::pipeline::planner::{find_pipeline, Planner};

    // Configuration
    pub use crate::config::PlannerConfig;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
