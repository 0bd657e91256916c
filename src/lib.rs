//! vadscribe - Batch audio transcription with word-level timestamps
//!
//! Chunks long recordings along detected speech pauses, feeds each chunk to
//! an external word-level transcription engine, and reassembles the results
//! into a segmented transcript with absolute timestamps.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod app;
pub mod audio;
pub mod chunking;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stt;
pub mod transcript;

// Core traits (plan → transcribe → assemble)
pub use audio::vad::{SpeechDetector, SpeechInterval};
pub use chunking::{Chunk, ChunkStrategy};
pub use stt::transcriber::{RawWord, WordTranscriber};

// Pipeline
pub use pipeline::orchestrator::{Orchestrator, OrchestratorConfig};
pub use pipeline::progress::{NullReporter, ProgressReporter, StderrReporter};

// Error handling
pub use error::{Result, VadscribeError};

// Config
pub use config::{ChunkMode, Config};

// Output document model
pub use transcript::{Segment, SegmentWord, Transcript};
