//! Chunk planning strategies.
//!
//! A chunker turns a decoded audio buffer into an ordered list of sample
//! ranges, each small enough to hand to the transcription engine in one call.

pub mod consolidator;
pub mod window;

pub use consolidator::{ConsolidatorConfig, VadChunker};
pub use window::{FixedWindowChunker, WindowConfig};

use crate::error::Result;

/// A planned transcription unit as a sample range into the input buffer.
///
/// Invariant: `start < end`. Chunks from a strategy are ordered by `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    /// Chunk length in samples.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Chunk start offset in seconds.
    pub fn start_secs(&self, sample_rate: u32) -> f64 {
        self.start as f64 / sample_rate as f64
    }

    /// Chunk end offset in seconds.
    pub fn end_secs(&self, sample_rate: u32) -> f64 {
        self.end as f64 / sample_rate as f64
    }
}

/// Trait for chunk planning strategies.
///
/// Implementations must produce chunks ordered by start position. Ranges may
/// overlap (the fixed-window strategy does when configured with an overlap).
pub trait ChunkStrategy: Send + Sync {
    fn plan(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<Chunk>>;

    /// Short name used in progress output.
    fn name(&self) -> &str;
}
