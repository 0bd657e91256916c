//! Pipeline progress reporting.

/// Receives pipeline progress events.
///
/// Chunk indexes are 1-based for display.
pub trait ProgressReporter: Send + Sync {
    fn chunk_started(&self, index: usize, total: usize, start_secs: f64, end_secs: f64);
    fn chunk_finished(&self, index: usize, total: usize, words: usize);
    fn pipeline_finished(&self, chunks: usize, words: usize, segments: usize);
}

/// Reporter that prints progress to stderr, keeping stdout free for output.
pub struct StderrReporter;

impl ProgressReporter for StderrReporter {
    fn chunk_started(&self, index: usize, total: usize, start_secs: f64, end_secs: f64) {
        eprintln!(
            "vadscribe: chunk {}/{} [{:.1}s - {:.1}s]",
            index, total, start_secs, end_secs
        );
    }

    fn chunk_finished(&self, index: usize, total: usize, words: usize) {
        eprintln!("vadscribe: chunk {}/{} done ({} words)", index, total, words);
    }

    fn pipeline_finished(&self, chunks: usize, words: usize, segments: usize) {
        eprintln!(
            "vadscribe: finished {} chunks, {} words, {} segments",
            chunks, words, segments
        );
    }
}

/// Reporter that swallows all events.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn chunk_started(&self, _index: usize, _total: usize, _start_secs: f64, _end_secs: f64) {}
    fn chunk_finished(&self, _index: usize, _total: usize, _words: usize) {}
    fn pipeline_finished(&self, _chunks: usize, _words: usize, _segments: usize) {}
}
