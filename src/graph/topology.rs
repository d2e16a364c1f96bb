//! Constraint-free analysis of the transformation graph.
//!
//! Provides:
//! - Reachability between stream types
//! - Detection of sources that can never become playable
//! - Graphviz export

use crate::core::error::{EdgeId, GraphError, GraphResult};
use crate::core::types::{StreamType, TransformerKind};
use crate::graph::structure::TransformerGraph;
use indexmap::IndexMap;
use petgraph::algo::has_path_connecting;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use std::fmt;

/// Edge weight of the analysis view.
#[derive(Debug, Clone, Copy)]
struct EdgeLabel {
    id: EdgeId,
    kind: TransformerKind,
    cost: f64,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.cost)
    }
}

/// Analyzer for graph topology.
pub struct TopologyAnalyzer {
    view: DiGraph<StreamType, EdgeLabel>,
    indices: IndexMap<StreamType, NodeIndex>,
}

impl TopologyAnalyzer {
    /// Create a new analyzer for the given graph.
    pub fn new(graph: &TransformerGraph) -> Self {
        let mut view = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
        let indices: IndexMap<StreamType, NodeIndex> = graph
            .stream_types()
            .map(|t| (t, view.add_node(t)))
            .collect();

        for edge in graph.edges() {
            view.add_edge(
                indices[&edge.from],
                indices[&edge.to],
                EdgeLabel {
                    id: edge.id,
                    kind: edge.kind,
                    cost: edge.cost,
                },
            );
        }

        Self { view, indices }
    }

    fn index(&self, stream_type: StreamType) -> GraphResult<NodeIndex> {
        self.indices
            .get(&stream_type)
            .copied()
            .ok_or(GraphError::UnknownStreamType(stream_type))
    }

    /// Check if `to` can be reached from `from` by any number of edges.
    ///
    /// A type always reaches itself.
    pub fn can_reach(&self, from: StreamType, to: StreamType) -> GraphResult<bool> {
        let (a, b) = (self.index(from)?, self.index(to)?);
        Ok(has_path_connecting(&self.view, a, b, None))
    }

    /// All stream types reachable from `from`, in breadth-first order.
    pub fn reachable_from(&self, from: StreamType) -> GraphResult<Vec<StreamType>> {
        let mut bfs = Bfs::new(&self.view, self.index(from)?);
        let mut reached = Vec::new();
        while let Some(ix) = bfs.next(&self.view) {
            reached.push(self.view[ix]);
        }
        Ok(reached)
    }

    /// Stream types that can never be turned into `goal`.
    pub fn unreachable_from(&self, goal: StreamType) -> GraphResult<Vec<StreamType>> {
        let target = self.index(goal)?;
        Ok(self
            .indices
            .iter()
            .filter(|(_, ix)| !has_path_connecting(&self.view, **ix, target, None))
            .map(|(&t, _)| t)
            .collect())
    }

    /// Ids of the edges whose transformer is of the given kind.
    pub fn edges_of_kind(&self, kind: TransformerKind) -> Vec<EdgeId> {
        self.view
            .edge_weights()
            .filter(|label| label.kind == kind)
            .map(|label| label.id)
            .collect()
    }

    /// Render the graph in Graphviz dot format.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.view))
    }
}
