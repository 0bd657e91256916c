use crate::defaults;
use crate::error::{Result, VadscribeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub chunking: ChunkingConfig,
    pub segmentation: SegmentationConfig,
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

/// Audio decoding and voice activity detection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub vad_threshold: f32,
    pub min_speech_ms: u32,
    pub min_silence_ms: u32,
}

/// Chunk planning strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ChunkMode {
    /// Consolidate speech intervals detected by VAD.
    Vad,
    /// Tile the input with fixed windows.
    Fixed,
}

/// Chunk planning configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    pub mode: ChunkMode,
    pub merge_gap: f64,
    pub max_chunk: f64,
    pub split_gap: f64,
    pub chunk_duration: f64,
    pub overlap: f64,
}

/// Output segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    pub gap_threshold: f64,
    pub max_duration: f64,
    pub break_at_word_start: bool,
}

/// Transcription engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine command line; the staged chunk path is appended as the final
    /// argument.
    pub command: String,
    pub model: String,
    pub language: String,
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Directory for staged chunk files; system temp dir when unset.
    pub staging_dir: Option<PathBuf>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            vad_threshold: defaults::VAD_THRESHOLD,
            min_speech_ms: defaults::MIN_SPEECH_MS,
            min_silence_ms: defaults::MIN_SILENCE_MS,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            mode: ChunkMode::Vad,
            merge_gap: defaults::MERGE_GAP_SECS,
            max_chunk: defaults::MAX_CHUNK_SECS,
            split_gap: defaults::SPLIT_GAP_SECS,
            chunk_duration: defaults::WINDOW_SECS,
            overlap: defaults::WINDOW_OVERLAP_SECS,
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            gap_threshold: defaults::GAP_THRESHOLD_SECS,
            max_duration: defaults::MAX_SEGMENT_SECS,
            break_at_word_start: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            staging_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VadscribeError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VadscribeError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only falls back to defaults when the file is missing; invalid TOML
    /// still fails.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VadscribeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VADSCRIBE_ENGINE → engine.command
    /// - VADSCRIBE_MODEL → engine.model
    /// - VADSCRIBE_LANGUAGE → engine.language
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(command) = std::env::var("VADSCRIBE_ENGINE")
            && !command.is_empty()
        {
            self.engine.command = command;
        }

        if let Ok(model) = std::env::var("VADSCRIBE_MODEL")
            && !model.is_empty()
        {
            self.engine.model = model;
        }

        if let Ok(language) = std::env::var("VADSCRIBE_LANGUAGE")
            && !language.is_empty()
        {
            self.engine.language = language;
        }

        self
    }

    /// Check the numeric ranges the pipeline depends on.
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(invalid("audio.sample_rate", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.audio.vad_threshold) {
            return Err(invalid("audio.vad_threshold", "must be between 0.0 and 1.0"));
        }
        if self.chunking.merge_gap < 0.0 {
            return Err(invalid("chunking.merge_gap", "must not be negative"));
        }
        if self.chunking.max_chunk <= 0.0 {
            return Err(invalid("chunking.max_chunk", "must be positive"));
        }
        if self.chunking.split_gap < 0.0 {
            return Err(invalid("chunking.split_gap", "must not be negative"));
        }
        if self.chunking.chunk_duration <= 0.0 {
            return Err(invalid("chunking.chunk_duration", "must be positive"));
        }
        if self.chunking.overlap < 0.0 {
            return Err(invalid("chunking.overlap", "must not be negative"));
        }
        if self.chunking.overlap >= self.chunking.chunk_duration {
            return Err(invalid(
                "chunking.overlap",
                "must be smaller than chunk_duration",
            ));
        }
        if self.segmentation.gap_threshold <= 0.0 {
            return Err(invalid("segmentation.gap_threshold", "must be positive"));
        }
        if self.segmentation.max_duration <= 0.0 {
            return Err(invalid("segmentation.max_duration", "must be positive"));
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/vadscribe/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vadscribe").join("config.toml"))
    }
}

fn invalid(key: &str, message: &str) -> VadscribeError {
    VadscribeError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
