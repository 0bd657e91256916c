//! Error types for vadscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VadscribeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input errors
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    #[error("Failed to decode audio: {message}")]
    AudioDecode { message: String },

    // Transcription engine errors
    #[error("Failed to launch transcription engine: {message}")]
    EngineSpawn { message: String },

    #[error("Unreadable transcription engine output: {message}")]
    EngineOutput { message: String },

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VadscribeError>;
