//! Transcription engine trait and test double.

use crate::error::{Result, VadscribeError};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A word as reported by the engine, with times relative to the chunk start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWord {
    #[serde(alias = "text")]
    pub word: String,
    pub start: f64,
    pub end: f64,
    /// Absent when the engine does not score words.
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Trait for word-level transcription engines.
///
/// An engine receives a staged chunk file and returns words with chunk-local
/// timestamps. It may hold expensive resources between calls;
/// `release_resources` is invoked after every chunk, success or failure.
pub trait WordTranscriber: Send + Sync {
    fn transcribe_chunk(&self, chunk: &Path) -> Result<Vec<RawWord>>;

    /// Engine name used in progress output and errors.
    fn engine_name(&self) -> &str;

    /// Drop per-chunk resources. Called after every chunk.
    fn release_resources(&self) {}
}

/// Mock transcription engine for testing
pub struct MockWordTranscriber {
    name: String,
    responses: Mutex<VecDeque<Result<Vec<RawWord>>>>,
    fallback: Vec<RawWord>,
    calls: AtomicUsize,
    releases: AtomicUsize,
    chunk_paths: Mutex<Vec<PathBuf>>,
}

impl MockWordTranscriber {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: Mutex::new(VecDeque::new()),
            fallback: Vec::new(),
            calls: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            chunk_paths: Mutex::new(Vec::new()),
        }
    }

    /// Queue a scripted response; responses are consumed in order, after
    /// which the fallback applies.
    pub fn with_response(self, words: Vec<RawWord>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Ok(words));
        }
        self
    }

    /// Queue a scripted failure.
    pub fn with_failure(self, message: &str) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Err(VadscribeError::Transcription {
                message: message.to_string(),
            }));
        }
        self
    }

    /// Words returned once the scripted responses are exhausted.
    pub fn with_fallback(mut self, words: Vec<RawWord>) -> Self {
        self.fallback = words;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Chunk paths the engine was handed, in call order.
    pub fn recorded_paths(&self) -> Vec<PathBuf> {
        self.chunk_paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl WordTranscriber for MockWordTranscriber {
    fn transcribe_chunk(&self, chunk: &Path) -> Result<Vec<RawWord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.chunk_paths.lock() {
            paths.push(chunk.to_path_buf());
        }
        if let Ok(mut responses) = self.responses.lock() {
            if let Some(response) = responses.pop_front() {
                return response;
            }
        }
        Ok(self.fallback.clone())
    }

    fn engine_name(&self) -> &str {
        &self.name
    }

    fn release_resources(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(word: &str, start: f64, end: f64) -> RawWord {
        RawWord {
            word: word.to_string(),
            start,
            end,
            confidence: Some(0.9),
        }
    }

    #[test]
    fn raw_word_deserializes_word_field() {
        let json = r#"{"word": "hello", "start": 0.1, "end": 0.5, "confidence": 0.97}"#;
        let word: RawWord = serde_json::from_str(json).unwrap();

        assert_eq!(word.word, "hello");
        assert_eq!(word.confidence, Some(0.97));
    }

    #[test]
    fn raw_word_accepts_text_alias() {
        let json = r#"{"text": "hello", "start": 0.1, "end": 0.5}"#;
        let word: RawWord = serde_json::from_str(json).unwrap();

        assert_eq!(word.word, "hello");
        assert_eq!(word.confidence, None);
    }

    #[test]
    fn raw_word_confidence_defaults_to_none() {
        let json = r#"[{"word": "a", "start": 0.0, "end": 0.2}]"#;
        let words: Vec<RawWord> = serde_json::from_str(json).unwrap();

        assert_eq!(words[0].confidence, None);
    }

    #[test]
    fn mock_returns_scripted_responses_in_order() {
        let mock = MockWordTranscriber::new("mock")
            .with_response(vec![raw("first", 0.0, 0.5)])
            .with_response(vec![raw("second", 0.0, 0.5)]);

        let a = mock.transcribe_chunk(Path::new("/a.wav")).unwrap();
        let b = mock.transcribe_chunk(Path::new("/b.wav")).unwrap();

        assert_eq!(a[0].word, "first");
        assert_eq!(b[0].word, "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn mock_falls_back_when_script_exhausted() {
        let mock = MockWordTranscriber::new("mock").with_fallback(vec![raw("again", 0.0, 0.5)]);

        let first = mock.transcribe_chunk(Path::new("/a.wav")).unwrap();
        let second = mock.transcribe_chunk(Path::new("/b.wav")).unwrap();

        assert_eq!(first[0].word, "again");
        assert_eq!(second[0].word, "again");
    }

    #[test]
    fn mock_scripted_failure_surfaces_as_error() {
        let mock = MockWordTranscriber::new("mock").with_failure("engine crashed");

        let result = mock.transcribe_chunk(Path::new("/a.wav"));

        assert!(matches!(
            result,
            Err(VadscribeError::Transcription { .. })
        ));
    }

    #[test]
    fn mock_records_chunk_paths_and_releases() {
        let mock = MockWordTranscriber::new("mock");

        let _ = mock.transcribe_chunk(Path::new("/chunks/1.wav"));
        mock.release_resources();
        let _ = mock.transcribe_chunk(Path::new("/chunks/2.wav"));
        mock.release_resources();

        assert_eq!(
            mock.recorded_paths(),
            vec![PathBuf::from("/chunks/1.wav"), PathBuf::from("/chunks/2.wav")]
        );
        assert_eq!(mock.release_count(), 2);
    }

    #[test]
    fn engine_name_is_reported() {
        let mock = MockWordTranscriber::new("mock-engine");
        assert_eq!(mock.engine_name(), "mock-engine");
    }
}
