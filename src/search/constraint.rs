//! Ready-made constraint predicates.
//!
//! A constraint sees a complete candidate path (ordered edges, source
//! first) at the moment it reaches the goal. It must be pure and cheap: the
//! search may call it many times.

use crate::core::types::TransformerKind;
use crate::graph::structure::Edge;
use std::sync::Arc;

/// A type-erased constraint that can be stored and shared between threads.
pub type SharedConstraint = Arc<dyn Fn(&[&Edge]) -> bool + Send + Sync>;

/// Whether any edge in the path is of the given kind.
pub fn contains_kind(path: &[&Edge], kind: TransformerKind) -> bool {
    path.iter().any(|edge| edge.kind == kind)
}

/// Accept every path.
pub fn always() -> impl Fn(&[&Edge]) -> bool + Copy + Send + Sync {
    |_: &[&Edge]| true
}

/// Accept only paths that use the given transformer at least once.
pub fn requires(kind: TransformerKind) -> impl Fn(&[&Edge]) -> bool + Copy + Send + Sync {
    move |path: &[&Edge]| contains_kind(path, kind)
}

/// Accept only paths that never use the given transformer.
pub fn excludes(kind: TransformerKind) -> impl Fn(&[&Edge]) -> bool + Copy + Send + Sync {
    move |path: &[&Edge]| !contains_kind(path, kind)
}

/// Accept only paths whose total cost does not exceed `limit`.
pub fn max_cost(limit: f64) -> impl Fn(&[&Edge]) -> bool + Copy + Send + Sync {
    move |path: &[&Edge]| path.iter().map(|edge| edge.cost).sum::<f64>() <= limit
}

/// The playback constraint: when inline volume control is wanted the
/// pipeline must pass through the volume transformer, otherwise anything
/// goes.
pub fn volume(inline: bool) -> impl Fn(&[&Edge]) -> bool + Copy + Send + Sync {
    move |path: &[&Edge]| !inline || contains_kind(path, TransformerKind::InlineVolume)
}

/// Erase a constraint's type so it can be stored.
pub fn shared<C>(constraint: C) -> SharedConstraint
where
    C: Fn(&[&Edge]) -> bool + Send + Sync + 'static,
{
    Arc::new(constraint)
}
