//! Command-line interface for vadscribe
//!
//! Provides argument parsing using clap derive macros.

use crate::config::ChunkMode;
use clap::Parser;
use std::path::PathBuf;

/// Batch audio transcription with word-level timestamps
#[derive(Parser, Debug)]
#[command(
    name = "vadscribe",
    version,
    about = "Batch audio transcription with word-level timestamps"
)]
pub struct Cli {
    /// Input WAV file to transcribe
    #[arg(value_name = "AUDIO")]
    pub input: PathBuf,

    /// Directory for the output JSON document (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chunk planning strategy
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ChunkMode>,

    /// Transcription engine command; the chunk path is appended as the final argument
    #[arg(long, value_name = "COMMAND")]
    pub engine: Option<String>,

    /// Model identifier forwarded to the engine as --model
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Language tag recorded in the output (not inferred). Examples: en, de, es
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Merge speech intervals separated by less than this. Examples: 1, 0.5, 2s
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub merge_gap: Option<f64>,

    /// Soft upper bound on chunk duration. Examples: 30, 5m
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub max_chunk: Option<f64>,

    /// Minimum pause at which an oversized chunk may be re-split
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub split_gap: Option<f64>,

    /// Fixed window duration. Examples: 30, 5m, 1h30m
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub chunk_duration: Option<f64>,

    /// Overlap between consecutive fixed windows
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub overlap: Option<f64>,

    /// Pause duration that starts a new output segment
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub gap_threshold: Option<f64>,

    /// Maximum output segment duration before a split is forced
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub max_duration: Option<f64>,

    /// Defer segment breaks until the next token starts a new word
    #[arg(long)]
    pub break_at_word_start: bool,

    /// Suppress progress output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: per-chunk progress detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a duration string into fractional seconds.
///
/// Supports bare numbers (`30`, `0.25`) and any format accepted by
/// `humantime` (`30s`, `5m`, `1h30m`).
fn parse_secs(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<f64>() {
        if !secs.is_finite() {
            return Err("duration must be finite".to_string());
        }
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs_f64())
        .map_err(|e| e.to_string())
}
