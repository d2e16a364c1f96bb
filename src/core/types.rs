//! Stream and transformer tags that label the transformation graph.
//!
//! Both sets are closed: every representation an audio source can take on
//! its way to the voice connection, and every transformer that moves it
//! between two of them, is known at compile time.

use crate::core::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The representation of an audio stream at a point in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamType {
    /// The type of the stream at this point is unknown.
    #[serde(rename = "arbitrary")]
    Arbitrary,
    /// Opus audio in an Ogg container.
    #[serde(rename = "ogg/opus")]
    OggOpus,
    /// Opus packets in object mode. This is ready to play.
    #[serde(rename = "opus")]
    Opus,
    /// Signed 16-bit little-endian PCM.
    #[serde(rename = "raw")]
    Raw,
    /// Opus audio in a WebM container.
    #[serde(rename = "webm/opus")]
    WebmOpus,
}

impl StreamType {
    /// Every stream type, in declaration order.
    pub const ALL: [StreamType; 5] = [
        StreamType::Arbitrary,
        StreamType::OggOpus,
        StreamType::Opus,
        StreamType::Raw,
        StreamType::WebmOpus,
    ];

    /// The stream type a voice connection can send without further work.
    pub const PLAYBACK: StreamType = StreamType::Opus;

    /// Stable name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            StreamType::Arbitrary => "arbitrary",
            StreamType::OggOpus => "ogg/opus",
            StreamType::Opus => "opus",
            StreamType::Raw => "raw",
            StreamType::WebmOpus => "webm/opus",
        }
    }

    /// Whether this is the playback-ready representation.
    pub fn is_playback_ready(&self) -> bool {
        *self == Self::PLAYBACK
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GraphError::UnknownStreamName(s.to_string()))
    }
}

/// Identifies which concrete transformer an edge stands for.
///
/// Constraint predicates match on this tag, so the set and the display
/// names are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransformerKind {
    /// In-place PCM volume scaling.
    #[serde(rename = "volume transformer")]
    InlineVolume,
    /// Extracts Opus packets from an Ogg container.
    #[serde(rename = "ogg/opus demuxer")]
    OggOpusDemuxer,
    /// Decodes Opus packets to PCM.
    #[serde(rename = "opus decoder")]
    OpusDecoder,
    /// Encodes PCM to Opus packets.
    #[serde(rename = "opus encoder")]
    OpusEncoder,
    /// Extracts Opus packets from a WebM container.
    #[serde(rename = "webm/opus demuxer")]
    WebmOpusDemuxer,
}

impl TransformerKind {
    /// Every transformer kind, in declaration order.
    pub const ALL: [TransformerKind; 5] = [
        TransformerKind::InlineVolume,
        TransformerKind::OggOpusDemuxer,
        TransformerKind::OpusDecoder,
        TransformerKind::OpusEncoder,
        TransformerKind::WebmOpusDemuxer,
    ];

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            TransformerKind::InlineVolume => "volume transformer",
            TransformerKind::OggOpusDemuxer => "ogg/opus demuxer",
            TransformerKind::OpusDecoder => "opus decoder",
            TransformerKind::OpusEncoder => "opus encoder",
            TransformerKind::WebmOpusDemuxer => "webm/opus demuxer",
        }
    }
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
