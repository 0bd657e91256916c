//! Transcript data model and segment assembly.
//!
//! Word tokens carry absolute times in the original recording; segments group
//! them into readable units for the output document.

pub mod builder;

pub use builder::{SegmentBuilder, SegmenterConfig};

use serde::Serialize;

/// A transcribed word with absolute timing, before segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct WordToken {
    pub text: String,
    /// Start time in seconds from the beginning of the recording.
    pub start: f64,
    /// End time in seconds from the beginning of the recording.
    pub end: f64,
    /// Engine confidence in the range 0.0 to 1.0.
    pub confidence: f64,
}

/// A word as it appears in the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub score: f64,
}

/// A contiguous group of words in the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub words: Vec<SegmentWord>,
}

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub segments: Vec<Segment>,
    pub language: String,
}

impl Transcript {
    /// Total number of words across all segments.
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }
}

/// Round a time value to millisecond precision for output.
pub fn round_time(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round a confidence score to four decimal places for output.
pub fn round_score(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}
