//! Graph structure: stream type nodes and transformer edges.
//!
//! Nodes and edges live in flat tables. A node lists the ids of its
//! outbound edges, and an edge names its endpoints by [`StreamType`], so
//! there are no references between the two and the graph can be shared
//! freely across threads once built.

use crate::core::error::{EdgeId, GraphError, GraphResult};
use crate::core::transformer::{FactoryRegistry, TransformerFactory};
use crate::core::types::{StreamType, TransformerKind};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A transformation graph shared between planners and threads.
pub type SharedGraph = Arc<TransformerGraph>;

/// A declared, costed transformer between two stream types.
#[derive(Clone)]
pub struct Edge {
    /// Position in the graph's edge table.
    pub id: EdgeId,
    /// Stream type the transformer consumes.
    pub from: StreamType,
    /// Stream type the transformer produces.
    pub to: StreamType,
    /// Which transformer this is.
    pub kind: TransformerKind,
    /// Relative weight of running the transformer (not wall-clock time).
    pub cost: f64,
    /// Creates a live instance of the transformer.
    pub factory: TransformerFactory,
}

impl Edge {
    /// Whether the edge maps a stream type onto itself (e.g. a filter).
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("kind", &self.kind)
            .field("cost", &self.cost)
            .finish()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.kind, self.to)
    }
}

/// One vertex per stream type.
#[derive(Debug, Clone)]
pub struct Node {
    /// The stream type this node stands for.
    pub stream_type: StreamType,
    /// Outbound edges, in registration order.
    edges: Vec<EdgeId>,
}

impl Node {
    fn new(stream_type: StreamType) -> Self {
        Self {
            stream_type,
            edges: Vec::new(),
        }
    }

    /// Ids of the outbound edges, in registration order.
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of outbound edges.
    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

/// The static graph of stream types and the transformers between them.
///
/// Built once through [`GraphBuilder`] and read-only afterwards.
pub struct TransformerGraph {
    nodes: IndexMap<StreamType, Node>,
    edges: Vec<Edge>,
}

impl TransformerGraph {
    /// Start building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Get the node for a stream type.
    pub fn node(&self, stream_type: StreamType) -> GraphResult<&Node> {
        self.nodes
            .get(&stream_type)
            .ok_or(GraphError::UnknownStreamType(stream_type))
    }

    /// Check if a stream type has a node.
    pub fn has_node(&self, stream_type: StreamType) -> bool {
        self.nodes.contains_key(&stream_type)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> GraphResult<&Edge> {
        self.edges.get(id.index()).ok_or(GraphError::EdgeNotFound(id))
    }

    /// Outbound edges of a stream type, in registration order.
    pub fn edges_from(&self, stream_type: StreamType) -> GraphResult<impl Iterator<Item = &Edge>> {
        let node = self.node(stream_type)?;
        Ok(node.edges.iter().map(move |id| &self.edges[id.index()]))
    }

    /// All nodes, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All stream types with a node.
    pub fn stream_types(&self) -> impl Iterator<Item = StreamType> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges, in registration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Wrap the graph for sharing.
    pub fn into_shared(self) -> SharedGraph {
        Arc::new(self)
    }
}

impl fmt::Debug for TransformerGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerGraph")
            .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .finish()
    }
}

struct PendingEdge {
    from: StreamType,
    to: StreamType,
    kind: TransformerKind,
    cost: f64,
}

/// Builder for a [`TransformerGraph`].
///
/// Edges are validated in [`GraphBuilder::build`], so declaration order of
/// nodes and edges does not matter.
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<StreamType>,
    edges: Vec<PendingEdge>,
    factories: FactoryRegistry,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Registering the same type twice is a no-op.
    pub fn node(mut self, stream_type: StreamType) -> Self {
        if !self.nodes.contains(&stream_type) {
            self.nodes.push(stream_type);
        }
        self
    }

    /// Register a node for every stream type.
    pub fn all_nodes(self) -> Self {
        StreamType::ALL.into_iter().fold(self, Self::node)
    }

    /// Declare a transformer between two stream types.
    pub fn edge(
        mut self,
        from: StreamType,
        to: StreamType,
        kind: TransformerKind,
        cost: f64,
    ) -> Self {
        self.edges.push(PendingEdge { from, to, kind, cost });
        self
    }

    /// Provide the implementation for a transformer kind.
    pub fn factory(mut self, kind: TransformerKind, factory: TransformerFactory) -> Self {
        self.factories.register_shared(kind, factory);
        self
    }

    /// Provide implementations for several kinds at once.
    pub fn factories(mut self, factories: FactoryRegistry) -> Self {
        for kind in factories.kinds() {
            self.factories.register_shared(kind, factories.resolve(kind));
        }
        self
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> GraphResult<TransformerGraph> {
        let mut nodes: IndexMap<StreamType, Node> = self
            .nodes
            .iter()
            .map(|&t| (t, Node::new(t)))
            .collect();
        let mut edges = Vec::with_capacity(self.edges.len());

        for pending in self.edges {
            if !pending.cost.is_finite() || pending.cost < 0.0 {
                return Err(GraphError::InvalidCost {
                    kind: pending.kind,
                    cost: pending.cost,
                });
            }
            if !nodes.contains_key(&pending.to) {
                return Err(GraphError::UnknownStreamType(pending.to));
            }
            let id = EdgeId(edges.len());
            nodes
                .get_mut(&pending.from)
                .ok_or(GraphError::UnknownStreamType(pending.from))?
                .edges
                .push(id);
            edges.push(Edge {
                id,
                from: pending.from,
                to: pending.to,
                kind: pending.kind,
                cost: pending.cost,
                factory: self.factories.resolve(pending.kind),
            });
        }

        log::debug!(
            "built transformer graph with {} nodes and {} edges",
            nodes.len(),
            edges.len()
        );

        Ok(TransformerGraph { nodes, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TransformError;
    use crate::core::transformer::{passthrough, StreamInput};
    use std::io::Cursor;

    #[test]
    fn test_one_node_per_stream_type() {
        let graph = GraphBuilder::new()
            .node(StreamType::Raw)
            .node(StreamType::Raw)
            .all_nodes()
            .build()
            .unwrap();

        assert_eq!(graph.node_count(), StreamType::ALL.len());
        for t in StreamType::ALL {
            assert_eq!(graph.node(t).unwrap().stream_type, t);
        }
    }

    #[test]
    fn test_edges_keep_registration_order() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.5)
            .edge(StreamType::Raw, StreamType::Raw, TransformerKind::InlineVolume, 0.5)
            .build()
            .unwrap();

        let kinds: Vec<_> = graph
            .edges_from(StreamType::Raw)
            .unwrap()
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![TransformerKind::OpusEncoder, TransformerKind::InlineVolume]);
        assert!(graph.edge(EdgeId(1)).unwrap().is_self_loop());
    }

    #[test]
    fn test_unregistered_node_lookup() {
        let graph = GraphBuilder::new().node(StreamType::Raw).build().unwrap();
        assert_eq!(
            graph.node(StreamType::Opus).unwrap_err(),
            GraphError::UnknownStreamType(StreamType::Opus)
        );
        assert!(graph.edges_from(StreamType::Opus).is_err());
    }

    #[test]
    fn test_edge_to_unregistered_node() {
        let result = GraphBuilder::new()
            .node(StreamType::Raw)
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.5)
            .build();
        assert_eq!(result.unwrap_err(), GraphError::UnknownStreamType(StreamType::Opus));
    }

    #[test]
    fn test_invalid_costs_rejected() {
        for cost in [-1.0, f64::INFINITY, f64::NAN] {
            let result = GraphBuilder::new()
                .all_nodes()
                .edge(StreamType::Raw, StreamType::Raw, TransformerKind::InlineVolume, cost)
                .build();
            assert!(matches!(result, Err(GraphError::InvalidCost { .. })));
        }
    }

    #[test]
    fn test_factories_are_attached() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::Raw, StreamType::Raw, TransformerKind::InlineVolume, 0.5)
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.5)
            .factory(TransformerKind::InlineVolume, passthrough())
            .build()
            .unwrap();

        let volume = graph.edge(EdgeId(0)).unwrap();
        let input = StreamInput::Stream(Box::new(Cursor::new(vec![1u8, 2])));
        assert!((volume.factory)(input).is_ok());

        let encoder = graph.edge(EdgeId(1)).unwrap();
        let input = StreamInput::Stream(Box::new(Cursor::new(vec![1u8, 2])));
        assert!(matches!(
            (encoder.factory)(input),
            Err(TransformError::Unavailable(TransformerKind::OpusEncoder))
        ));
    }

    #[test]
    fn test_edge_display() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::OggOpus, StreamType::Opus, TransformerKind::OggOpusDemuxer, 1.0)
            .build()
            .unwrap();
        assert_eq!(
            graph.edges()[0].to_string(),
            "ogg/opus -[ogg/opus demuxer]-> opus"
        );
    }
}
