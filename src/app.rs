//! Application wiring for the command-line binary.
//!
//! Resolves configuration from file, environment and flags, builds the
//! pipeline pieces and runs a single transcription.

use crate::audio::vad::{EnergyVad, VadConfig};
use crate::audio::wav::load_wav;
use crate::chunking::{
    ChunkStrategy, ConsolidatorConfig, FixedWindowChunker, VadChunker, WindowConfig,
};
use crate::cli::Cli;
use crate::config::{ChunkMode, Config};
use crate::error::{Result, VadscribeError};
use crate::output::write_transcript;
use crate::pipeline::{NullReporter, Orchestrator, OrchestratorConfig, ProgressReporter, StderrReporter};
use crate::stt::{CommandTranscriber, CommandTranscriberConfig, WordTranscriber};
use crate::transcript::SegmenterConfig;

/// Run a transcription as described by the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    config.validate()?;

    if !cli.input.is_file() {
        return Err(VadscribeError::InputFileNotFound {
            path: cli.input.display().to_string(),
        });
    }

    let audio = load_wav(&cli.input)?;
    let strategy = build_strategy(&config)?;
    let engine = build_engine(&config)?;

    if !cli.quiet && cli.verbose > 0 {
        eprintln!(
            "vadscribe: {} ({:.1}s), {} chunking, engine {}",
            cli.input.display(),
            audio.duration_secs(),
            strategy.name(),
            engine.engine_name(),
        );
    }

    let reporter: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(NullReporter)
    } else {
        Box::new(StderrReporter)
    };
    let orchestrator = Orchestrator::with_reporter(
        OrchestratorConfig {
            sample_rate: audio.sample_rate,
            language: config.engine.language.clone(),
            segmenter: SegmenterConfig {
                gap_threshold: config.segmentation.gap_threshold,
                max_duration: config.segmentation.max_duration,
                break_at_word_start: config.segmentation.break_at_word_start,
            },
            staging_dir: config.output.staging_dir.clone(),
        },
        reporter,
    );

    let transcript = orchestrator.run(&audio.samples, strategy.as_ref(), &engine)?;
    let path = write_transcript(&transcript, &cli.input, &config.output.directory)?;

    if !cli.quiet {
        eprintln!("vadscribe: wrote {}", path.display());
    }
    Ok(())
}

/// Layer configuration sources: file, then environment, then flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let config = match (&cli.config, Config::default_path()) {
        // An explicitly named file must exist
        (Some(path), _) => Config::load(path)?,
        (None, Some(path)) => Config::load_or_default(&path)?,
        (None, None) => Config::default(),
    };
    Ok(apply_cli_overrides(config.with_env_overrides(), cli))
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(mode) = cli.mode {
        config.chunking.mode = mode;
    }
    if let Some(engine) = &cli.engine {
        config.engine.command = engine.clone();
    }
    if let Some(model) = &cli.model {
        config.engine.model = model.clone();
    }
    if let Some(language) = &cli.language {
        config.engine.language = language.clone();
    }
    if let Some(merge_gap) = cli.merge_gap {
        config.chunking.merge_gap = merge_gap;
    }
    if let Some(max_chunk) = cli.max_chunk {
        config.chunking.max_chunk = max_chunk;
    }
    if let Some(split_gap) = cli.split_gap {
        config.chunking.split_gap = split_gap;
    }
    if let Some(chunk_duration) = cli.chunk_duration {
        config.chunking.chunk_duration = chunk_duration;
    }
    if let Some(overlap) = cli.overlap {
        config.chunking.overlap = overlap;
    }
    if let Some(gap_threshold) = cli.gap_threshold {
        config.segmentation.gap_threshold = gap_threshold;
    }
    if let Some(max_duration) = cli.max_duration {
        config.segmentation.max_duration = max_duration;
    }
    if cli.break_at_word_start {
        config.segmentation.break_at_word_start = true;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.directory = output_dir.clone();
    }
    config
}

fn build_strategy(config: &Config) -> Result<Box<dyn ChunkStrategy>> {
    match config.chunking.mode {
        ChunkMode::Vad => {
            let detector = EnergyVad::new(VadConfig {
                threshold: config.audio.vad_threshold,
                min_speech_ms: config.audio.min_speech_ms,
                min_silence_ms: config.audio.min_silence_ms,
                ..VadConfig::default()
            });
            let chunker = VadChunker::new(
                Box::new(detector),
                ConsolidatorConfig {
                    merge_gap: config.chunking.merge_gap,
                    max_chunk: config.chunking.max_chunk,
                    split_gap: config.chunking.split_gap,
                },
            )?;
            Ok(Box::new(chunker))
        }
        ChunkMode::Fixed => {
            let chunker = FixedWindowChunker::new(WindowConfig {
                chunk_duration: config.chunking.chunk_duration,
                overlap: config.chunking.overlap,
            })?;
            Ok(Box::new(chunker))
        }
    }
}

fn build_engine(config: &Config) -> Result<CommandTranscriber> {
    let mut parts = config.engine.command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(VadscribeError::ConfigInvalidValue {
            key: "engine.command".to_string(),
            message: "no transcription engine configured; set engine.command or pass --engine"
                .to_string(),
        });
    };
    CommandTranscriber::new(CommandTranscriberConfig {
        program: program.to_string(),
        args: parts.map(str::to_string).collect(),
        model: if config.engine.model.is_empty() {
            None
        } else {
            Some(config.engine.model.clone())
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let cli = cli(&[
            "vadscribe",
            "a.wav",
            "--mode",
            "fixed",
            "--engine",
            "my-engine --flag",
            "--language",
            "de",
            "--merge-gap",
            "2.5",
            "--break-at-word-start",
            "-o",
            "/tmp/out",
        ]);

        let config = apply_cli_overrides(Config::default(), &cli);

        assert_eq!(config.chunking.mode, ChunkMode::Fixed);
        assert_eq!(config.engine.command, "my-engine --flag");
        assert_eq!(config.engine.language, "de");
        assert_eq!(config.chunking.merge_gap, 2.5);
        assert!(config.segmentation.break_at_word_start);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn unset_flags_leave_config_untouched() {
        let cli = cli(&["vadscribe", "a.wav"]);

        let config = apply_cli_overrides(Config::default(), &cli);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn engine_command_is_split_on_whitespace() {
        let mut config = Config::default();
        config.engine.command = "parakeet-cli --timestamps --beam 4".to_string();

        let engine = build_engine(&config).unwrap();

        assert_eq!(engine.engine_name(), "parakeet-cli");
    }

    #[test]
    fn missing_engine_command_is_a_config_error() {
        let config = Config::default();

        let result = build_engine(&config);

        assert!(matches!(
            result,
            Err(VadscribeError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn strategy_follows_configured_mode() {
        let mut config = Config::default();
        config.chunking.mode = ChunkMode::Vad;
        assert_eq!(build_strategy(&config).unwrap().name(), "vad");

        config.chunking.mode = ChunkMode::Fixed;
        assert_eq!(build_strategy(&config).unwrap().name(), "fixed");
    }

    #[test]
    fn missing_input_file_is_reported() {
        let cli = cli(&[
            "vadscribe",
            "/nonexistent/audio.wav",
            "--engine",
            "true",
            "-q",
        ]);

        let result = run(cli);

        assert!(matches!(
            result,
            Err(VadscribeError::InputFileNotFound { .. })
        ));
    }
}
