//! Constrained minimum-cost path search.
//!
//! Depth-bounded recursive exploration of the transformation graph. Outbound
//! edges are tried in registration order; the caller's constraint is only
//! consulted once a candidate path reaches the goal, never on prefixes.

use crate::core::error::{EdgeId, GraphResult, PlanError, PlanResult};
use crate::core::types::StreamType;
use crate::graph::structure::{Edge, TransformerGraph};
use serde::{Deserialize, Serialize};

/// Default number of transformers a pipeline may chain.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Largest depth budget the search accepts. Larger budgets are clamped.
///
/// With a rejecting constraint the number of explored paths grows
/// exponentially with depth, so the budget must stay small.
pub const MAX_SEARCH_DEPTH: usize = 16;

/// Search options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Stream type the path must end at.
    pub goal: StreamType,
    /// Maximum number of edges in a path.
    pub max_depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            goal: StreamType::PLAYBACK,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SearchOptions {
    /// Create options with the defaults (playback-ready goal, depth 5).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the goal stream type.
    pub fn with_goal(mut self, goal: StreamType) -> Self {
        self.goal = goal;
        self
    }

    /// Set the depth budget, clamped to [`MAX_SEARCH_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_SEARCH_DEPTH);
        self
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Edges followed into a recursive call.
    pub expanded: usize,
    /// Edges skipped because their own cost beat no sibling.
    pub pruned: usize,
    /// Times the constraint was evaluated at the goal.
    pub goal_checks: usize,
}

/// The cheapest constraint-satisfying route found by [`find_path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Where the path starts.
    pub start: StreamType,
    /// Where the path ends.
    pub goal: StreamType,
    /// Edges to apply, source to destination.
    pub edges: Vec<EdgeId>,
    /// Sum of the edge costs.
    pub cost: f64,
    /// Search counters.
    pub stats: SearchStats,
}

impl Path {
    /// Whether no transformation is required.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Best option found below a node. Edge ids are stored goal-first so each
/// level can append its own edge.
struct Solution {
    cost: f64,
    reversed: Vec<EdgeId>,
}

struct Search<'g, 'c, C: ?Sized> {
    graph: &'g TransformerGraph,
    goal: StreamType,
    constraint: &'c C,
    stats: SearchStats,
}

impl<'g, 'c, C> Search<'g, 'c, C>
where
    C: Fn(&[&Edge]) -> bool + ?Sized,
{
    fn explore(
        &mut self,
        at: StreamType,
        path: &mut Vec<&'g Edge>,
        depth: usize,
    ) -> GraphResult<Option<Solution>> {
        if at == self.goal {
            self.stats.goal_checks += 1;
            if (self.constraint)(path.as_slice()) {
                return Ok(Some(Solution {
                    cost: 0.0,
                    reversed: Vec::new(),
                }));
            }
        }
        if depth == 0 {
            return Ok(None);
        }

        let graph = self.graph;
        let mut best: Option<Solution> = None;
        for edge in graph.edges_from(at)? {
            if let Some(current) = &best {
                // The edge alone is already dearer than a complete option.
                if edge.cost > current.cost {
                    self.stats.pruned += 1;
                    log::trace!("pruned {} at depth {}", edge, depth);
                    continue;
                }
            }

            self.stats.expanded += 1;
            log::trace!("expanding {} with {} steps left", edge, depth - 1);
            path.push(edge);
            let next = self.explore(edge.to, path, depth - 1)?;
            path.pop();

            if let Some(mut next) = next {
                let cost = edge.cost + next.cost;
                // Strictly cheaper only: the first minimal option wins ties.
                if best.as_ref().map_or(true, |current| cost < current.cost) {
                    next.cost = cost;
                    next.reversed.push(edge.id);
                    best = Some(next);
                }
            }
        }

        Ok(best)
    }
}

/// Find the cheapest path from `start` to `options.goal` that satisfies
/// `constraint` and uses at most `options.max_depth` edges.
///
/// A budget above [`MAX_SEARCH_DEPTH`] is clamped to it.
///
/// Returns [`PlanError::NoViablePipeline`] when no such path exists, and a
/// graph error if `start` or the goal has no node.
pub fn find_path<C>(
    graph: &TransformerGraph,
    start: StreamType,
    constraint: &C,
    options: SearchOptions,
) -> PlanResult<Path>
where
    C: Fn(&[&Edge]) -> bool + ?Sized,
{
    graph.node(start)?;
    graph.node(options.goal)?;

    let max_depth = options.max_depth.min(MAX_SEARCH_DEPTH);
    if max_depth < options.max_depth {
        log::warn!(
            "depth budget {} clamped to {}",
            options.max_depth,
            MAX_SEARCH_DEPTH
        );
    }
    log::debug!(
        "searching {} -> {} (max depth {})",
        start,
        options.goal,
        max_depth
    );

    let mut search = Search {
        graph,
        goal: options.goal,
        constraint,
        stats: SearchStats::default(),
    };
    let mut scratch = Vec::with_capacity(max_depth);
    let solution = search.explore(start, &mut scratch, max_depth)?;

    match solution {
        Some(Solution { cost, mut reversed }) => {
            reversed.reverse();
            log::debug!(
                "found path {} -> {} with {} edges, cost {} ({:?})",
                start,
                options.goal,
                reversed.len(),
                cost,
                search.stats
            );
            Ok(Path {
                start,
                goal: options.goal,
                edges: reversed,
                cost,
                stats: search.stats,
            })
        }
        None => {
            log::debug!(
                "no path {} -> {} within depth {} ({:?})",
                start,
                options.goal,
                max_depth,
                search.stats
            );
            Err(PlanError::NoViablePipeline {
                from: start,
                goal: options.goal,
                max_depth,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GraphError;
    use crate::core::types::TransformerKind;
    use crate::graph::structure::GraphBuilder;
    use crate::search::constraint;

    fn standard() -> TransformerGraph {
        TransformerGraph::standard().unwrap()
    }

    fn cheapest(graph: &TransformerGraph, start: StreamType) -> Path {
        find_path(graph, start, &constraint::always(), SearchOptions::new()).unwrap()
    }

    fn kinds(graph: &TransformerGraph, path: &Path) -> Vec<TransformerKind> {
        path.edges
            .iter()
            .map(|&id| graph.edge(id).unwrap().kind)
            .collect()
    }

    #[test]
    fn test_already_at_goal() {
        let graph = standard();
        let path = cheapest(&graph, StreamType::Opus);
        assert!(path.is_empty());
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_container_takes_single_demuxer() {
        let graph = standard();
        let path = cheapest(&graph, StreamType::OggOpus);
        assert_eq!(kinds(&graph, &path), vec![TransformerKind::OggOpusDemuxer]);
        assert_eq!(path.cost, 1.0);

        let path = cheapest(&graph, StreamType::WebmOpus);
        assert_eq!(kinds(&graph, &path), vec![TransformerKind::WebmOpusDemuxer]);
    }

    #[test]
    fn test_raw_encodes_directly() {
        let graph = standard();
        let path = cheapest(&graph, StreamType::Raw);
        assert_eq!(kinds(&graph, &path), vec![TransformerKind::OpusEncoder]);
        assert_eq!(path.cost, 1.5);
    }

    #[test]
    fn test_excluding_volume_never_filters() {
        let graph = standard();
        let no_volume = constraint::excludes(TransformerKind::InlineVolume);
        let path = find_path(&graph, StreamType::Raw, &no_volume, SearchOptions::new()).unwrap();
        assert_eq!(kinds(&graph, &path), vec![TransformerKind::OpusEncoder]);
        assert_eq!(path.cost, 1.5);
    }

    #[test]
    fn test_requiring_volume_filters_then_encodes() {
        let graph = standard();
        let volume = constraint::requires(TransformerKind::InlineVolume);
        let path = find_path(&graph, StreamType::Raw, &volume, SearchOptions::new()).unwrap();
        assert_eq!(
            kinds(&graph, &path),
            vec![TransformerKind::InlineVolume, TransformerKind::OpusEncoder]
        );
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn test_volume_on_playback_ready_source_decodes_first() {
        let graph = standard();
        let volume = constraint::requires(TransformerKind::InlineVolume);
        let path = find_path(&graph, StreamType::Opus, &volume, SearchOptions::new()).unwrap();
        assert_eq!(
            kinds(&graph, &path),
            vec![
                TransformerKind::OpusDecoder,
                TransformerKind::InlineVolume,
                TransformerKind::OpusEncoder,
            ]
        );
        assert_eq!(path.cost, 3.5);
    }

    #[test]
    fn test_container_with_volume_uses_full_depth_budget() {
        let graph = standard();
        let volume = constraint::requires(TransformerKind::InlineVolume);
        let path = find_path(&graph, StreamType::WebmOpus, &volume, SearchOptions::new()).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.cost, 4.5);

        let shallow = SearchOptions::new().with_max_depth(3);
        let err = find_path(&graph, StreamType::WebmOpus, &volume, shallow).unwrap_err();
        assert!(matches!(err, PlanError::NoViablePipeline { max_depth: 3, .. }));
    }

    #[test]
    fn test_isolated_type_is_unreachable() {
        let graph = standard();
        let always = constraint::always();
        let err = find_path(&graph, StreamType::Arbitrary, &always, SearchOptions::new())
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::NoViablePipeline {
                from: StreamType::Arbitrary,
                goal: StreamType::Opus,
                max_depth: DEFAULT_MAX_DEPTH,
            }
        );
    }

    #[test]
    fn test_self_loop_terminates_when_rejected() {
        // Every path is rejected, so the volume self-loop is followed until
        // the depth budget runs out on every branch.
        let graph = standard();
        let path = find_path(&graph, StreamType::Raw, &|_: &[&Edge]| false, SearchOptions::new());
        assert!(matches!(path, Err(PlanError::NoViablePipeline { .. })));
    }

    #[test]
    fn test_constraint_only_checked_at_goal() {
        let graph = standard();
        let seen = std::cell::RefCell::new(Vec::new());
        let recording = |path: &[&Edge]| {
            seen.borrow_mut().push(path.last().map(|e| e.to));
            true
        };
        find_path(&graph, StreamType::Raw, &recording, SearchOptions::new()).unwrap();

        let seen = seen.into_inner();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|end| *end == Some(StreamType::Opus)));
    }

    #[test]
    fn test_explicit_goal() {
        let graph = standard();
        let options = SearchOptions::new().with_goal(StreamType::Raw);
        let path = find_path(&graph, StreamType::OggOpus, &constraint::always(), options).unwrap();
        assert_eq!(
            kinds(&graph, &path),
            vec![TransformerKind::OggOpusDemuxer, TransformerKind::OpusDecoder]
        );
        assert_eq!(path.goal, StreamType::Raw);
    }

    #[test]
    fn test_zero_depth_only_accepts_start() {
        let graph = standard();
        let options = SearchOptions::new().with_max_depth(0);
        assert!(find_path(&graph, StreamType::Opus, &constraint::always(), options).is_ok());
        assert!(find_path(&graph, StreamType::Raw, &constraint::always(), options).is_err());
    }

    #[test]
    fn test_ties_keep_first_registered_edge() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.0)
            .edge(StreamType::Raw, StreamType::OggOpus, TransformerKind::InlineVolume, 0.5)
            .edge(StreamType::OggOpus, StreamType::Opus, TransformerKind::OggOpusDemuxer, 0.5)
            .build()
            .unwrap();
        let path = cheapest(&graph, StreamType::Raw);
        assert_eq!(path.edges, vec![EdgeId(0)]);
    }

    #[test]
    fn test_cheaper_later_sibling_replaces_best() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 3.0)
            .edge(StreamType::Raw, StreamType::OggOpus, TransformerKind::InlineVolume, 1.0)
            .edge(StreamType::OggOpus, StreamType::Opus, TransformerKind::OggOpusDemuxer, 1.0)
            .build()
            .unwrap();
        let path = cheapest(&graph, StreamType::Raw);
        assert_eq!(path.edges, vec![EdgeId(1), EdgeId(2)]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn test_expensive_sibling_is_pruned() {
        let graph = GraphBuilder::new()
            .all_nodes()
            .edge(StreamType::Raw, StreamType::Opus, TransformerKind::OpusEncoder, 1.0)
            .edge(StreamType::Raw, StreamType::OggOpus, TransformerKind::InlineVolume, 2.0)
            .edge(StreamType::OggOpus, StreamType::Opus, TransformerKind::OggOpusDemuxer, 0.0)
            .build()
            .unwrap();
        let path = cheapest(&graph, StreamType::Raw);
        assert_eq!(path.edges, vec![EdgeId(0)]);
        assert_eq!(path.stats.pruned, 1);
    }

    #[test]
    fn test_unknown_start_and_goal() {
        let graph = GraphBuilder::new().node(StreamType::Raw).build().unwrap();
        let always = constraint::always();
        let err = find_path(&graph, StreamType::Raw, &always, SearchOptions::new()).unwrap_err();
        assert_eq!(
            err,
            PlanError::Graph(GraphError::UnknownStreamType(StreamType::Opus))
        );

        let options = SearchOptions::new().with_goal(StreamType::Raw);
        let err = find_path(&graph, StreamType::WebmOpus, &always, options).unwrap_err();
        assert_eq!(
            err,
            PlanError::Graph(GraphError::UnknownStreamType(StreamType::WebmOpus))
        );
    }

    #[test]
    fn test_depth_budget_is_clamped() {
        let options = SearchOptions::new().with_max_depth(usize::MAX);
        assert_eq!(options.max_depth, MAX_SEARCH_DEPTH);

        // Fields are public, so the search clamps as well.
        let graph = standard();
        let unbounded = SearchOptions {
            goal: StreamType::Opus,
            max_depth: usize::MAX,
        };
        let path = find_path(&graph, StreamType::Opus, &constraint::always(), unbounded).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_huge_budget_with_rejecting_constraint_terminates() {
        let graph = standard();
        let unbounded = SearchOptions {
            goal: StreamType::Arbitrary,
            max_depth: 1_000,
        };
        let err = find_path(&graph, StreamType::Raw, &|_: &[&Edge]| false, unbounded).unwrap_err();
        assert_eq!(
            err,
            PlanError::NoViablePipeline {
                from: StreamType::Raw,
                goal: StreamType::Arbitrary,
                max_depth: MAX_SEARCH_DEPTH,
            }
        );
    }
}
