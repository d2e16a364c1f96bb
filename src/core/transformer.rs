//! The contract between the planner and concrete transformer implementations.
//!
//! Codecs, demuxers and filters live outside this crate. All the planner
//! needs from them is a factory per [`TransformerKind`] that turns an input
//! into an output stream of the edge's destination type.

use crate::core::error::TransformError;
use crate::core::types::TransformerKind;
use indexmap::IndexMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// A live byte stream flowing between two pipeline stages.
pub type AudioStream = Box<dyn Read + Send>;

/// What a transformer is fed with.
pub enum StreamInput {
    /// Output of a previous stage, or the source itself.
    Stream(AudioStream),
    /// An addressable resource (path or URL) the first stage opens itself.
    Resource(String),
}

impl fmt::Debug for StreamInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamInput::Stream(_) => f.write_str("Stream(<audio>)"),
            StreamInput::Resource(id) => f.debug_tuple("Resource").field(id).finish(),
        }
    }
}

impl From<AudioStream> for StreamInput {
    fn from(stream: AudioStream) -> Self {
        StreamInput::Stream(stream)
    }
}

impl From<String> for StreamInput {
    fn from(resource: String) -> Self {
        StreamInput::Resource(resource)
    }
}

impl From<&str> for StreamInput {
    fn from(resource: &str) -> Self {
        StreamInput::Resource(resource.to_string())
    }
}

/// Factory function for creating a transformer stage.
pub type TransformerFactory =
    Arc<dyn Fn(StreamInput) -> Result<AudioStream, TransformError> + Send + Sync>;

/// Factory used for kinds nobody registered an implementation for.
pub fn unavailable(kind: TransformerKind) -> TransformerFactory {
    Arc::new(move |_| Err(TransformError::Unavailable(kind)))
}

/// Factory that forwards its input stream untouched.
///
/// Useful for tests and for filters that are configured to be a no-op.
pub fn passthrough() -> TransformerFactory {
    Arc::new(|input| match input {
        StreamInput::Stream(stream) => Ok(stream),
        StreamInput::Resource(id) => Err(TransformError::UnresolvedResource(id)),
    })
}

/// Registry of transformer implementations, keyed by kind.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: IndexMap<TransformerKind, TransformerFactory>,
}

impl FactoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the implementation of a transformer kind.
    pub fn register<F>(&mut self, kind: TransformerKind, factory: F)
    where
        F: Fn(StreamInput) -> Result<AudioStream, TransformError> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
    }

    /// Register an already shared factory.
    pub fn register_shared(&mut self, kind: TransformerKind, factory: TransformerFactory) {
        self.factories.insert(kind, factory);
    }

    /// Builder-style registration.
    pub fn with<F>(mut self, kind: TransformerKind, factory: F) -> Self
    where
        F: Fn(StreamInput) -> Result<AudioStream, TransformError> + Send + Sync + 'static,
    {
        self.register(kind, factory);
        self
    }

    /// Get the factory for a kind, if one is registered.
    pub fn get(&self, kind: TransformerKind) -> Option<&TransformerFactory> {
        self.factories.get(&kind)
    }

    /// Get the factory for a kind, or one that reports it as unavailable.
    pub fn resolve(&self, kind: TransformerKind) -> TransformerFactory {
        self.get(kind).cloned().unwrap_or_else(|| unavailable(kind))
    }

    /// Check if a kind has an implementation.
    pub fn contains(&self, kind: TransformerKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = TransformerKind> + '_ {
        self.factories.keys().copied()
    }

    /// Get the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
