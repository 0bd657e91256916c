//! Segment assembly from word tokens.
//!
//! Groups the flat word stream into segments, breaking at long pauses and
//! capping segment duration so no single segment runs away.

use crate::defaults;
use crate::transcript::{Segment, SegmentWord, WordToken};

/// Parameters controlling segment breaks.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// Pause duration in seconds that triggers a new segment.
    pub gap_threshold: f64,
    /// Maximum segment duration in seconds before a split is forced.
    pub max_duration: f64,
    /// When set, defer a break until the next token starts a new word.
    ///
    /// Engines that emit subword tokens glue continuations to the previous
    /// token without a leading space; breaking before one would split a word
    /// across segments.
    pub break_at_word_start: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            gap_threshold: defaults::GAP_THRESHOLD_SECS,
            max_duration: defaults::MAX_SEGMENT_SECS,
            break_at_word_start: false,
        }
    }
}

/// Builds output segments from an ordered word stream.
pub struct SegmentBuilder {
    config: SegmenterConfig,
}

impl SegmentBuilder {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Group word tokens into segments.
    ///
    /// Every input word lands in exactly one segment, in order. The final
    /// segment is always flushed regardless of its duration.
    pub fn build(&self, words: &[WordToken]) -> Vec<Segment> {
        if words.is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut start_idx = 0;
        for i in 1..words.len() {
            let prev = &words[i - 1];
            let cur = &words[i];
            let gap = cur.start - prev.end;
            let running = prev.end - words[start_idx].start;

            let mut should_break =
                gap > self.config.gap_threshold || running > self.config.max_duration;
            if should_break && self.config.break_at_word_start && !starts_new_word(&cur.text) {
                should_break = false;
            }
            if should_break {
                if let Some(segment) = finalize(&words[start_idx..i]) {
                    segments.push(segment);
                }
                start_idx = i;
            }
        }
        if let Some(segment) = finalize(&words[start_idx..]) {
            segments.push(segment);
        }
        segments
    }
}

impl Default for SegmentBuilder {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

/// A token begins a new word when it is empty or starts with whitespace.
/// Subword continuations are glued to the previous token without one.
fn starts_new_word(text: &str) -> bool {
    text.chars().next().is_none_or(|c| c.is_whitespace())
}

/// Turn a run of tokens into a segment. Tokens that trim to nothing are
/// dropped from `words` and `text` but still count for the segment bounds.
/// Returns `None` when nothing printable remains.
fn finalize(tokens: &[WordToken]) -> Option<Segment> {
    let kept: Vec<&WordToken> = tokens
        .iter()
        .filter(|t| !t.text.trim().is_empty())
        .collect();
    if kept.is_empty() {
        return None;
    }
    let (first, last) = (tokens.first()?, tokens.last()?);

    let text = kept
        .iter()
        .map(|t| t.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let words = kept
        .iter()
        .map(|t| SegmentWord {
            word: t.text.trim().to_string(),
            start: t.start,
            end: t.end,
            score: t.confidence,
        })
        .collect();

    Some(Segment {
        start: first.start,
        end: last.end,
        text,
        words,
    })
}
