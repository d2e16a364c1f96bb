//! Constrained shortest-path search over the transformation graph.

pub mod path;
pub mod constraint;

// Re-export commonly used types
pub use path::{
    find_path, Path, SearchOptions, SearchStats, DEFAULT_MAX_DEPTH, MAX_SEARCH_DEPTH,
};
pub use constraint::SharedConstraint;
