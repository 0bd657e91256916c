//! External transcription engine driven over a child process.
//!
//! The engine is any executable that accepts a WAV path as its final argument
//! and prints a JSON array of word objects to stdout:
//!
//! ```json
//! [{"word": "hello", "start": 0.12, "end": 0.48, "confidence": 0.97}]
//! ```
//!
//! Times are relative to the chunk start; `confidence` is optional.

use crate::error::{Result, VadscribeError};
use crate::stt::transcriber::{RawWord, WordTranscriber};
use std::path::Path;
use std::process::Command;

/// Configuration for the external engine command.
#[derive(Debug, Clone, Default)]
pub struct CommandTranscriberConfig {
    /// Executable to run.
    pub program: String,
    /// Fixed arguments placed before the chunk path.
    pub args: Vec<String>,
    /// Model identifier, forwarded as `--model <id>` when set.
    pub model: Option<String>,
}

/// Word-level transcription engine that shells out to an external command.
pub struct CommandTranscriber {
    config: CommandTranscriberConfig,
    name: String,
}

impl CommandTranscriber {
    pub fn new(config: CommandTranscriberConfig) -> Result<Self> {
        if config.program.trim().is_empty() {
            return Err(VadscribeError::ConfigInvalidValue {
                key: "engine.command".to_string(),
                message: "must name an executable".to_string(),
            });
        }
        let name = Path::new(&config.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.program.clone());
        Ok(Self { config, name })
    }
}

impl WordTranscriber for CommandTranscriber {
    fn transcribe_chunk(&self, chunk: &Path) -> Result<Vec<RawWord>> {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args);
        if let Some(model) = &self.config.model {
            command.arg("--model").arg(model);
        }
        command.arg(chunk);

        let output = command.output().map_err(|e| VadscribeError::EngineSpawn {
            message: format!("{}: {}", self.config.program, e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VadscribeError::Transcription {
                message: format!(
                    "{} exited with {}: {}",
                    self.name,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| VadscribeError::EngineOutput {
            message: format!("expected a JSON array of words: {}", e),
        })
    }

    fn engine_name(&self) -> &str {
        &self.name
    }
}
