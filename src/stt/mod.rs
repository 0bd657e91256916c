//! Speech-to-text engine interface.

pub mod command;
pub mod transcriber;

pub use command::{CommandTranscriber, CommandTranscriberConfig};
pub use transcriber::{MockWordTranscriber, RawWord, WordTranscriber};
