//! Default configuration constants for vadscribe.
//!
//! Shared across the configuration types to keep CLI flags, TOML defaults and
//! the library API consistent.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard rate for speech recognition engines; all input audio
/// is downmixed and resampled to it before chunking.
pub const SAMPLE_RATE: u32 = 16000;

/// Default RMS threshold for the energy-based voice activity detector.
pub const VAD_THRESHOLD: f32 = 0.02;

/// Minimum speech run duration in milliseconds.
///
/// Speech bursts shorter than this are treated as noise and discarded.
pub const MIN_SPEECH_MS: u32 = 250;

/// Minimum silence duration in milliseconds to split speech intervals.
///
/// Silence shorter than this does not end a speech interval, so brief
/// intra-word dips do not fragment the detection output.
pub const MIN_SILENCE_MS: u32 = 100;

/// Default gap below which consecutive speech intervals merge into one chunk,
/// in seconds.
pub const MERGE_GAP_SECS: f64 = 1.0;

/// Default soft upper bound on chunk duration in seconds.
///
/// Merged chunks longer than this are re-split at speech pauses. A chunk
/// backed by a single uninterrupted interval may still exceed it.
pub const MAX_CHUNK_SECS: f64 = 30.0;

/// Default minimum pause at which an oversized chunk may be re-split,
/// in seconds.
pub const SPLIT_GAP_SECS: f64 = 0.25;

/// Default fixed-window chunk duration in seconds.
pub const WINDOW_SECS: f64 = 30.0;

/// Default overlap between consecutive fixed windows in seconds.
pub const WINDOW_OVERLAP_SECS: f64 = 0.0;

/// Pause duration in seconds that triggers a new output segment.
pub const GAP_THRESHOLD_SECS: f64 = 0.4;

/// Maximum output segment duration in seconds before a split is forced.
pub const MAX_SEGMENT_SECS: f64 = 10.0;

/// Default language tag recorded in the output document.
///
/// The tag is passed through unchanged; vadscribe never infers the language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default model identifier forwarded to the transcription engine command.
pub const DEFAULT_MODEL: &str = "nvidia/parakeet-tdt-0.6b-v3";
