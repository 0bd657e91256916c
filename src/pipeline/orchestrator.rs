//! Sequential chunk orchestration.
//!
//! Plans chunks, stages each one as a temporary WAV file for the engine,
//! shifts the returned word times to absolute positions and assembles the
//! final transcript. Chunks run strictly one at a time so engine memory use
//! stays bounded to a single chunk.

use crate::audio::wav::write_mono_wav;
use crate::chunking::ChunkStrategy;
use crate::defaults;
use crate::error::Result;
use crate::pipeline::progress::{ProgressReporter, StderrReporter};
use crate::stt::transcriber::{RawWord, WordTranscriber};
use crate::transcript::{round_score, round_time, SegmentBuilder, SegmenterConfig, Transcript, WordToken};
use std::path::PathBuf;

/// Pipeline-level settings.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Sample rate of the input buffer and the staged chunk files.
    pub sample_rate: u32,
    /// Language tag recorded in the output, passed through unchanged.
    pub language: String,
    pub segmenter: SegmenterConfig,
    /// Directory for staged chunk files; system temp dir when unset.
    pub staging_dir: Option<PathBuf>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            segmenter: SegmenterConfig::default(),
            staging_dir: None,
        }
    }
}

/// Runs the chunk-transcribe-assemble pipeline.
pub struct Orchestrator {
    config: OrchestratorConfig,
    reporter: Box<dyn ProgressReporter>,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            config,
            reporter: Box::new(StderrReporter),
        }
    }

    pub fn with_reporter(config: OrchestratorConfig, reporter: Box<dyn ProgressReporter>) -> Self {
        Self { config, reporter }
    }

    /// Transcribe a full recording.
    ///
    /// Word times in the result are absolute within the recording. The engine
    /// gets `release_resources` after every chunk, whether it succeeded or
    /// not, so a failure never leaves per-chunk state behind.
    pub fn run(
        &self,
        samples: &[i16],
        strategy: &dyn ChunkStrategy,
        engine: &dyn WordTranscriber,
    ) -> Result<Transcript> {
        let rate = self.config.sample_rate;
        let chunks = strategy.plan(samples, rate)?;
        let total = chunks.len();

        let mut words: Vec<WordToken> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let start = chunk.start.min(samples.len());
            let end = chunk.end.min(samples.len());
            self.reporter
                .chunk_started(i + 1, total, chunk.start_secs(rate), chunk.end_secs(rate));

            let result = self.transcribe_staged(&samples[start..end], engine);
            engine.release_resources();
            let raw = result?;

            let offset = chunk.start as f64 / rate as f64;
            self.reporter.chunk_finished(i + 1, total, raw.len());
            words.extend(raw.into_iter().map(|w| shift_word(w, offset)));
        }

        let segments = SegmentBuilder::new(self.config.segmenter).build(&words);
        let transcript = Transcript {
            segments,
            language: self.config.language.clone(),
        };
        self.reporter.pipeline_finished(
            total,
            transcript.word_count(),
            transcript.segments.len(),
        );

        Ok(transcript)
    }

    /// Stage a chunk as a WAV file and hand it to the engine.
    ///
    /// The file lives only for this call; it is removed on every exit path,
    /// including engine failure. Removal failures are ignored.
    fn transcribe_staged(&self, slice: &[i16], engine: &dyn WordTranscriber) -> Result<Vec<RawWord>> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vadscribe-chunk-").suffix(".wav");
        let staged = match &self.config.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        write_mono_wav(staged.path(), slice, self.config.sample_rate)?;
        engine.transcribe_chunk(staged.path())
    }
}

/// Shift a chunk-local word to absolute time, rounding for output.
fn shift_word(raw: RawWord, offset: f64) -> WordToken {
    WordToken {
        text: raw.word,
        start: round_time(raw.start + offset),
        end: round_time(raw.end + offset),
        confidence: round_score(raw.confidence.unwrap_or(1.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::window::{FixedWindowChunker, WindowConfig};
    use crate::error::VadscribeError;
    use crate::pipeline::progress::NullReporter;
    use crate::stt::transcriber::MockWordTranscriber;

    const RATE: u32 = 16000;

    fn raw(word: &str, start: f64, end: f64, confidence: Option<f64>) -> RawWord {
        RawWord {
            word: word.to_string(),
            start,
            end,
            confidence,
        }
    }

    fn quiet_orchestrator(config: OrchestratorConfig) -> Orchestrator {
        Orchestrator::with_reporter(config, Box::new(NullReporter))
    }

    fn ten_second_windows() -> FixedWindowChunker {
        FixedWindowChunker::new(WindowConfig {
            chunk_duration: 10.0,
            overlap: 0.0,
        })
        .unwrap()
    }

    #[test]
    fn empty_audio_yields_empty_transcript() {
        let orchestrator = quiet_orchestrator(OrchestratorConfig::default());
        let engine = MockWordTranscriber::new("mock");

        let transcript = orchestrator
            .run(&[], &ten_second_windows(), &engine)
            .unwrap();

        assert!(transcript.segments.is_empty());
        assert_eq!(transcript.language, "en");
        assert_eq!(engine.call_count(), 0);
    }

    #[test]
    fn word_times_are_shifted_by_chunk_offset() {
        // 25s of audio in 10s windows: chunks at 0s, 10s, 20s.
        let samples = vec![0i16; (25.0 * RATE as f64) as usize];
        let engine = MockWordTranscriber::new("mock")
            .with_response(vec![raw("one", 1.0, 1.5, Some(0.9))])
            .with_response(vec![raw("two", 2.0, 2.5, Some(0.8))])
            .with_response(vec![raw("three", 3.0, 3.5, None)]);

        let orchestrator = quiet_orchestrator(OrchestratorConfig {
            segmenter: SegmenterConfig {
                gap_threshold: f64::INFINITY,
                max_duration: f64::INFINITY,
                break_at_word_start: false,
            },
            ..OrchestratorConfig::default()
        });

        let transcript = orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        assert_eq!(transcript.segments.len(), 1);
        let words = &transcript.segments[0].words;
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].start, 1.0);
        assert_eq!(words[1].start, 12.0);
        assert_eq!(words[2].start, 23.0);
        assert_eq!(words[2].end, 23.5);
    }

    #[test]
    fn missing_confidence_defaults_to_one() {
        let samples = vec![0i16; RATE as usize];
        let engine =
            MockWordTranscriber::new("mock").with_response(vec![raw("word", 0.0, 0.5, None)]);
        let orchestrator = quiet_orchestrator(OrchestratorConfig::default());

        let transcript = orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        assert_eq!(transcript.segments[0].words[0].score, 1.0);
    }

    #[test]
    fn times_and_scores_are_rounded_for_output() {
        let samples = vec![0i16; RATE as usize];
        let engine = MockWordTranscriber::new("mock")
            .with_response(vec![raw("word", 0.123456, 0.654321, Some(0.987654))]);
        let orchestrator = quiet_orchestrator(OrchestratorConfig::default());

        let transcript = orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        let word = &transcript.segments[0].words[0];
        assert_eq!(word.start, 0.123);
        assert_eq!(word.end, 0.654);
        assert_eq!(word.score, 0.9877);
    }

    #[test]
    fn resources_are_released_after_every_chunk() {
        let samples = vec![0i16; (25.0 * RATE as f64) as usize];
        let engine = MockWordTranscriber::new("mock");
        let orchestrator = quiet_orchestrator(OrchestratorConfig::default());

        orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        assert_eq!(engine.call_count(), 3);
        assert_eq!(engine.release_count(), 3);
    }

    #[test]
    fn failure_stops_the_pipeline_but_still_releases() {
        let samples = vec![0i16; (25.0 * RATE as f64) as usize];
        let engine = MockWordTranscriber::new("mock")
            .with_response(vec![raw("ok", 0.0, 0.5, None)])
            .with_failure("out of memory");
        let orchestrator = quiet_orchestrator(OrchestratorConfig::default());

        let result = orchestrator.run(&samples, &ten_second_windows(), &engine);

        assert!(matches!(result, Err(VadscribeError::Transcription { .. })));
        assert_eq!(engine.call_count(), 2);
        assert_eq!(engine.release_count(), 2);
    }

    #[test]
    fn staged_files_are_wav_named_and_deleted() {
        let staging = tempfile::tempdir().unwrap();
        let samples = vec![0i16; (15.0 * RATE as f64) as usize];
        let engine = MockWordTranscriber::new("mock");
        let orchestrator = quiet_orchestrator(OrchestratorConfig {
            staging_dir: Some(staging.path().to_path_buf()),
            ..OrchestratorConfig::default()
        });

        orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        let paths = engine.recorded_paths();
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.starts_with(staging.path()));
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("vadscribe-chunk-"));
            assert!(name.ends_with(".wav"));
            assert!(!path.exists(), "staged file should be deleted: {:?}", path);
        }
        assert_ne!(paths[0], paths[1]);
    }

    #[test]
    fn staged_file_is_deleted_after_engine_failure() {
        let staging = tempfile::tempdir().unwrap();
        let samples = vec![0i16; RATE as usize];
        let engine = MockWordTranscriber::new("mock").with_failure("boom");
        let orchestrator = quiet_orchestrator(OrchestratorConfig {
            staging_dir: Some(staging.path().to_path_buf()),
            ..OrchestratorConfig::default()
        });

        let result = orchestrator.run(&samples, &ten_second_windows(), &engine);

        assert!(result.is_err());
        let paths = engine.recorded_paths();
        assert_eq!(paths.len(), 1);
        assert!(!paths[0].exists());
    }

    #[test]
    fn final_report_counts_output_words() {
        use std::sync::{Arc, Mutex};

        struct RecordingReporter {
            finished: Arc<Mutex<Option<(usize, usize, usize)>>>,
        }

        impl crate::pipeline::progress::ProgressReporter for RecordingReporter {
            fn chunk_started(&self, _: usize, _: usize, _: f64, _: f64) {}
            fn chunk_finished(&self, _: usize, _: usize, _: usize) {}
            fn pipeline_finished(&self, chunks: usize, words: usize, segments: usize) {
                if let Ok(mut finished) = self.finished.lock() {
                    *finished = Some((chunks, words, segments));
                }
            }
        }

        // The whitespace-only token is dropped from the output, so the
        // final report counts two words, not three.
        let samples = vec![0i16; RATE as usize];
        let engine = MockWordTranscriber::new("mock").with_response(vec![
            raw("one", 0.0, 0.2, None),
            raw("  ", 0.25, 0.3, None),
            raw("two", 0.35, 0.6, None),
        ]);

        let finished = Arc::new(Mutex::new(None));
        let orchestrator = Orchestrator::with_reporter(
            OrchestratorConfig::default(),
            Box::new(RecordingReporter {
                finished: Arc::clone(&finished),
            }),
        );
        let transcript = orchestrator
            .run(&samples, &ten_second_windows(), &engine)
            .unwrap();

        assert_eq!(transcript.word_count(), 2);
        assert_eq!(*finished.lock().unwrap(), Some((1, 2, 1)));
    }

    #[test]
    fn language_tag_is_passed_through() {
        let engine = MockWordTranscriber::new("mock");
        let orchestrator = quiet_orchestrator(OrchestratorConfig {
            language: "de".to_string(),
            ..OrchestratorConfig::default()
        });

        let transcript = orchestrator
            .run(&[], &ten_second_windows(), &engine)
            .unwrap();

        assert_eq!(transcript.language, "de");
    }
}
