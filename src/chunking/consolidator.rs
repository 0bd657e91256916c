//! VAD-driven chunk consolidation.
//!
//! Merges nearby speech intervals into transcription chunks, then re-splits
//! chunks that grew past the duration bound at the speech pauses they absorbed.

use crate::audio::vad::{SpeechDetector, SpeechInterval};
use crate::chunking::{Chunk, ChunkStrategy};
use crate::defaults;
use crate::error::{Result, VadscribeError};

/// Parameters for the merge and split passes.
#[derive(Debug, Clone, Copy)]
pub struct ConsolidatorConfig {
    /// Gaps shorter than this merge adjacent speech intervals, in seconds.
    pub merge_gap: f64,
    /// Soft upper bound on chunk duration, in seconds.
    pub max_chunk: f64,
    /// Minimum pause at which an oversized chunk may be re-split, in seconds.
    pub split_gap: f64,
}

impl Default for ConsolidatorConfig {
    fn default() -> Self {
        Self {
            merge_gap: defaults::MERGE_GAP_SECS,
            max_chunk: defaults::MAX_CHUNK_SECS,
            split_gap: defaults::SPLIT_GAP_SECS,
        }
    }
}

/// Consolidate speech intervals into chunks.
///
/// Runs the merge pass followed by the split pass. A chunk spanning a single
/// interval is never split, so the duration bound is soft: one uninterrupted
/// stretch of speech always stays whole.
pub fn consolidate(
    intervals: &[SpeechInterval],
    sample_rate: u32,
    config: &ConsolidatorConfig,
) -> Vec<Chunk> {
    if intervals.is_empty() {
        return Vec::new();
    }

    let merge_gap = (config.merge_gap * sample_rate as f64) as usize;
    let max_chunk = (config.max_chunk * sample_rate as f64) as usize;
    let split_gap = (config.split_gap * sample_rate as f64) as usize;

    // Merge pass: group intervals separated by less than merge_gap
    let mut groups: Vec<Vec<SpeechInterval>> = Vec::new();
    for &interval in intervals {
        match groups.last_mut() {
            Some(group) => {
                // detector output is ascending, so this never underflows
                let last_end = group[group.len() - 1].end;
                if interval.start - last_end < merge_gap {
                    group.push(interval);
                } else {
                    groups.push(vec![interval]);
                }
            }
            None => groups.push(vec![interval]),
        }
    }

    // Split pass: re-split oversized groups at the pauses they absorbed
    let mut chunks = Vec::new();
    for group in groups {
        let span = group[group.len() - 1].end - group[0].start;
        if span <= max_chunk || group.len() == 1 {
            chunks.push(Chunk {
                start: group[0].start,
                end: group[group.len() - 1].end,
            });
            continue;
        }

        // Close a sub-chunk before an interval that would push the running
        // duration past the bound, provided the pause is wide enough.
        let mut sub_start = group[0].start;
        for pair in group.windows(2) {
            let gap = pair[1].start - pair[0].end;
            if pair[1].end - sub_start > max_chunk && gap >= split_gap {
                chunks.push(Chunk {
                    start: sub_start,
                    end: pair[0].end,
                });
                sub_start = pair[1].start;
            }
        }
        chunks.push(Chunk {
            start: sub_start,
            end: group[group.len() - 1].end,
        });
    }

    chunks
}

/// Chunk strategy driven by voice activity detection.
pub struct VadChunker {
    detector: Box<dyn SpeechDetector>,
    config: ConsolidatorConfig,
}

impl VadChunker {
    pub fn new(detector: Box<dyn SpeechDetector>, config: ConsolidatorConfig) -> Result<Self> {
        if config.merge_gap < 0.0 {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.merge_gap".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if config.max_chunk <= 0.0 {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.max_chunk".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if config.split_gap < 0.0 {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "chunking.split_gap".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(Self { detector, config })
    }
}

impl ChunkStrategy for VadChunker {
    fn plan(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<Chunk>> {
        let intervals = self.detector.detect(samples, sample_rate);
        Ok(consolidate(&intervals, sample_rate, &self.config))
    }

    fn name(&self) -> &str {
        "vad"
    }
}
