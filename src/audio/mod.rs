//! Audio decoding and speech detection.

pub mod vad;
pub mod wav;
