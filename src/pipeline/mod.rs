//! Sequential transcription pipeline.

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use progress::{NullReporter, ProgressReporter, StderrReporter};
