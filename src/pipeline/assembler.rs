//! Turning a winning path into an ordered, instantiable pipeline.

use crate::core::error::{GraphError, GraphResult, TransformError};
use crate::core::transformer::{AudioStream, StreamInput};
use crate::core::types::{StreamType, TransformerKind};
use crate::graph::structure::{Edge, TransformerGraph};
use crate::search::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered recipe of transformer stages, source first.
///
/// An empty pipeline means the input is already in the goal representation.
#[derive(Debug, Clone)]
pub struct Pipeline {
    input: StreamType,
    output: StreamType,
    stages: Vec<Edge>,
}

impl Pipeline {
    /// Resolve a path's edge ids against the graph it was found in.
    ///
    /// The edges must chain from `path.start` to `path.goal`, each one
    /// starting where the previous one ended.
    pub fn from_path(graph: &TransformerGraph, path: &Path) -> GraphResult<Self> {
        let mut at = path.start;
        let mut stages = Vec::with_capacity(path.edges.len());
        for &id in &path.edges {
            let edge = graph.edge(id)?;
            if edge.from != at {
                return Err(GraphError::BrokenPath {
                    expected: at,
                    found: edge.from,
                });
            }
            at = edge.to;
            stages.push(edge.clone());
        }
        if at != path.goal {
            return Err(GraphError::BrokenPath {
                expected: path.goal,
                found: at,
            });
        }

        Ok(Self {
            input: path.start,
            output: path.goal,
            stages,
        })
    }

    /// The stages, in the order data flows through them.
    pub fn stages(&self) -> &[Edge] {
        &self.stages
    }

    /// Consume the pipeline, keeping only its stages.
    pub fn into_stages(self) -> Vec<Edge> {
        self.stages
    }

    /// Stream type the pipeline consumes.
    pub fn input_type(&self) -> StreamType {
        self.input
    }

    /// Stream type the pipeline produces.
    pub fn output_type(&self) -> StreamType {
        self.output
    }

    /// Transformer kinds, in order.
    pub fn kinds(&self) -> Vec<TransformerKind> {
        self.stages.iter().map(|edge| edge.kind).collect()
    }

    /// Whether some stage is of the given kind.
    pub fn contains(&self, kind: TransformerKind) -> bool {
        self.stages.iter().any(|edge| edge.kind == kind)
    }

    /// Total relative cost.
    pub fn cost(&self) -> f64 {
        self.stages.iter().map(|edge| edge.cost).sum()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no transformation is required.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// One-line rendering such as `raw -[opus encoder]-> opus`.
    pub fn describe(&self) -> String {
        let mut out = self.input.to_string();
        for edge in &self.stages {
            out.push_str(&format!(" -[{}]-> {}", edge.kind, edge.to));
        }
        out
    }

    /// Serializable summary for reporting.
    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            input: self.input,
            output: self.output,
            stages: self.kinds(),
            cost: self.cost(),
        }
    }

    /// Instantiate every stage and chain them, feeding each stage's output
    /// into the next one's input.
    ///
    /// Stops at the first stage that fails to start. With no stages, a
    /// stream input is returned untouched; a bare resource id cannot be
    /// played without something to open it.
    pub fn instantiate(&self, input: StreamInput) -> Result<AudioStream, TransformError> {
        let mut current = input;
        for edge in &self.stages {
            log::debug!("starting {}", edge);
            current = StreamInput::Stream((edge.factory)(current)?);
        }

        match current {
            StreamInput::Stream(stream) => Ok(stream),
            StreamInput::Resource(id) => Err(TransformError::UnresolvedResource(id)),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Pipeline description without the factories, for logs and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Stream type consumed.
    pub input: StreamType,
    /// Stream type produced.
    pub output: StreamType,
    /// Transformer kinds, in order.
    pub stages: Vec<TransformerKind>,
    /// Total relative cost.
    pub cost: f64,
}
