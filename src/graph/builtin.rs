//! The standard topology used for voice playback.
//!
//! Existing constraint predicates key off these transformer kinds and cost
//! magnitudes, so the table (and its order) must not drift.

use crate::core::error::GraphResult;
use crate::core::transformer::FactoryRegistry;
use crate::core::types::{StreamType, TransformerKind};
use crate::graph::structure::{GraphBuilder, TransformerGraph};

/// `(from, to, kind, cost)` for every standard edge, in registration order.
pub const STANDARD_EDGES: [(StreamType, StreamType, TransformerKind, f64); 5] = [
    (StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.5),
    (StreamType::Opus, StreamType::Raw, TransformerKind::OpusDecoder, 1.5),
    (StreamType::OggOpus, StreamType::Opus, TransformerKind::OggOpusDemuxer, 1.0),
    (StreamType::WebmOpus, StreamType::Opus, TransformerKind::WebmOpusDemuxer, 1.0),
    (StreamType::Raw, StreamType::Raw, TransformerKind::InlineVolume, 0.5),
];

/// Builder pre-populated with every node and the standard edges.
pub fn standard_builder() -> GraphBuilder {
    STANDARD_EDGES
        .iter()
        .fold(GraphBuilder::new().all_nodes(), |builder, &(from, to, kind, cost)| {
            builder.edge(from, to, kind, cost)
        })
}

impl TransformerGraph {
    /// The standard graph with no transformer implementations attached.
    ///
    /// Planning works as usual; instantiating a stage fails with
    /// [`TransformError::Unavailable`](crate::core::error::TransformError::Unavailable).
    pub fn standard() -> GraphResult<Self> {
        standard_builder().build()
    }

    /// The standard graph wired to the given implementations.
    pub fn standard_with(factories: FactoryRegistry) -> GraphResult<Self> {
        standard_builder().factories(factories).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_graph_shape() {
        let graph = TransformerGraph::standard().unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);

        assert_eq!(graph.node(StreamType::Raw).unwrap().out_degree(), 2);
        assert_eq!(graph.node(StreamType::Arbitrary).unwrap().out_degree(), 0);

        for (edge, &(from, to, kind, cost)) in graph.edges().iter().zip(STANDARD_EDGES.iter()) {
            assert_eq!((edge.from, edge.to, edge.kind), (from, to, kind));
            assert_eq!(edge.cost, cost);
        }
    }

    #[test]
    fn test_standard_with_factories() {
        let factories = FactoryRegistry::new()
            .with(TransformerKind::InlineVolume, |input| match input {
                crate::core::transformer::StreamInput::Stream(s) => Ok(s),
                crate::core::transformer::StreamInput::Resource(id) => {
                    Err(crate::core::error::TransformError::UnresolvedResource(id))
                }
            });
        let graph = TransformerGraph::standard_with(factories).unwrap();
        assert_eq!(graph.edge_count(), STANDARD_EDGES.len());
    }
}
