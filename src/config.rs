//! Planner configuration.
//!
//! Read from a TOML file, with environment variable overrides:
//!
//! ```toml
//! goal = "opus"
//! max_depth = 5
//! ```

use crate::core::error::{StreamRouteError, StreamRouteResult};
use crate::core::types::StreamType;
use crate::search::path::{SearchOptions, DEFAULT_MAX_DEPTH, MAX_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Stream type every pipeline must end at.
    pub goal: StreamType,
    /// Maximum number of transformers in a pipeline.
    pub max_depth: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            goal: StreamType::PLAYBACK,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PlannerConfig {
    /// Parse configuration from TOML text. Missing fields use defaults.
    pub fn from_toml_str(contents: &str) -> StreamRouteResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()
    }

    /// Reject a depth budget the search would not honour.
    fn validate(self) -> StreamRouteResult<Self> {
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(StreamRouteError::Other(format!(
                "max_depth {} exceeds the limit of {}",
                self.max_depth, MAX_SEARCH_DEPTH
            )));
        }
        Ok(self)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StreamRouteResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> StreamRouteResult<Self> {
        match Self::load(path) {
            Err(StreamRouteError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - STREAMROUTE_GOAL → goal
    /// - STREAMROUTE_MAX_DEPTH → max_depth
    pub fn with_env_overrides(self) -> StreamRouteResult<Self> {
        self.with_overrides(
            std::env::var("STREAMROUTE_GOAL").ok(),
            std::env::var("STREAMROUTE_MAX_DEPTH").ok(),
        )
    }

    fn with_overrides(
        mut self,
        goal: Option<String>,
        max_depth: Option<String>,
    ) -> StreamRouteResult<Self> {
        if let Some(goal) = goal.filter(|g| !g.is_empty()) {
            self.goal = goal.parse()?;
        }
        if let Some(depth) = max_depth.filter(|d| !d.is_empty()) {
            self.max_depth = depth.trim().parse().map_err(|_| {
                StreamRouteError::Other(format!("Invalid STREAMROUTE_MAX_DEPTH '{}'", depth))
            })?;
        }
        self.validate()
    }

    /// Search options described by this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::new()
            .with_goal(self.goal)
            .with_max_depth(self.max_depth)
    }
}
