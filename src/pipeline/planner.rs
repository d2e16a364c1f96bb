//! The query interface: which transformers turn a source into playable audio.
//!
//! The planner holds a graph built once at startup and injected as a
//! [`SharedGraph`]. It keeps no per-query state, so one planner can be
//! shared by any number of threads.

use crate::core::error::PlanResult;
use crate::core::types::StreamType;
use crate::graph::structure::{Edge, SharedGraph, TransformerGraph};
use crate::pipeline::assembler::Pipeline;
use crate::search::path::{find_path, SearchOptions};

/// Plans transformer pipelines over a shared graph.
#[derive(Debug, Clone)]
pub struct Planner {
    /// The transformation graph.
    graph: SharedGraph,
    /// Options used when the caller does not pass any.
    default_options: SearchOptions,
}

impl Planner {
    /// Create a planner over a shared graph.
    pub fn new(graph: SharedGraph) -> Self {
        Self {
            graph,
            default_options: SearchOptions::default(),
        }
    }

    /// Create a planner over the standard graph.
    pub fn standard() -> PlanResult<Self> {
        Ok(Self::new(TransformerGraph::standard()?.into_shared()))
    }

    /// Set the default search options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.default_options = options;
        self
    }

    /// The graph this planner searches.
    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    /// The default search options.
    pub fn options(&self) -> SearchOptions {
        self.default_options
    }

    /// Find the cheapest pipeline from `from` to the default goal that
    /// satisfies `constraint`.
    ///
    /// An empty pipeline means no transformation is required. When nothing
    /// fits within the depth budget the result is
    /// [`PlanError::NoViablePipeline`](crate::core::error::PlanError::NoViablePipeline),
    /// never an empty pipeline.
    pub fn find_pipeline<C>(&self, from: StreamType, constraint: &C) -> PlanResult<Pipeline>
    where
        C: Fn(&[&Edge]) -> bool + ?Sized,
    {
        self.find_pipeline_with(from, constraint, self.default_options)
    }

    /// Like [`Planner::find_pipeline`] with explicit options.
    pub fn find_pipeline_with<C>(
        &self,
        from: StreamType,
        constraint: &C,
        options: SearchOptions,
    ) -> PlanResult<Pipeline>
    where
        C: Fn(&[&Edge]) -> bool + ?Sized,
    {
        let path = find_path(&self.graph, from, constraint, options)?;
        Ok(Pipeline::from_path(&self.graph, &path)?)
    }
}

/// Find the cheapest pipeline from `from` to the playback-ready type.
pub fn find_pipeline<C>(
    graph: &TransformerGraph,
    from: StreamType,
    constraint: &C,
) -> PlanResult<Pipeline>
where
    C: Fn(&[&Edge]) -> bool + ?Sized,
{
    let path = find_path(graph, from, constraint, SearchOptions::default())?;
    Ok(Pipeline::from_path(graph, &path)?)
}
