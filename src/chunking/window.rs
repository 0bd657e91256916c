//! Fixed-duration window chunking.
//!
//! Content-agnostic fallback for audio where voice activity detection is
//! unreliable or disabled. Windows may overlap; overlapping words are kept
//! as-is downstream, so a non-zero overlap can duplicate words at the seams.

use crate::chunking::{Chunk, ChunkStrategy};
use crate::defaults;
use crate::error::{Result, VadscribeError};

/// Parameters for fixed-window chunking.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Window duration in seconds.
    pub chunk_duration: f64,
    /// Overlap between consecutive windows in seconds.
    pub overlap: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            chunk_duration: defaults::WINDOW_SECS,
            overlap: defaults::WINDOW_OVERLAP_SECS,
        }
    }
}

/// Chunk strategy that tiles the input with fixed windows.
pub struct FixedWindowChunker {
    config: WindowConfig,
}

impl FixedWindowChunker {
    pub fn new(config: WindowConfig) -> Result<Self> {
        if config.chunk_duration <= 0.0 {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.chunk_duration".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if config.overlap < 0.0 {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.overlap".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if config.overlap >= config.chunk_duration {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.overlap".to_string(),
                message: "must be smaller than chunk_duration".to_string(),
            });
        }
        Ok(Self { config })
    }
}

impl ChunkStrategy for FixedWindowChunker {
    fn plan(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<Chunk>> {
        let total = samples.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let window = (self.config.chunk_duration * sample_rate as f64) as usize;
        let overlap = (self.config.overlap * sample_rate as f64) as usize;
        // new() checks the seconds values, but truncation to samples can
        // still collapse the difference to zero and stall the scan below
        if overlap >= window {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.overlap".to_string(),
                message: format!(
                    "must be smaller than chunk_duration by at least one sample at {} Hz",
                    sample_rate
                ),
            });
        }
        let stride = window - overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total {
            let end = (start + window).min(total);
            chunks.push(Chunk { start, end });
            start += stride;
        }
        Ok(chunks)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
