//! Voice activity detection over a decoded audio buffer.
//!
//! Classifies fixed analysis windows by RMS energy, then assembles ordered
//! speech intervals honoring minimum speech and silence durations.

use crate::defaults;

/// A sample range flagged as containing speech.
///
/// Invariant: `start < end`. Intervals produced by a detector are ascending
/// and non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechInterval {
    pub start: usize,
    pub end: usize,
}

impl SpeechInterval {
    /// Interval length in samples.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Trait for voice-activity detection.
///
/// Treated as a pure function from audio to intervals; implementations must
/// return ascending, non-overlapping ranges.
pub trait SpeechDetector: Send + Sync {
    fn detect(&self, samples: &[i16], sample_rate: u32) -> Vec<SpeechInterval>;
}

/// Configuration for the energy-based detector.
#[derive(Debug, Clone, Copy)]
pub struct VadConfig {
    /// RMS threshold for detecting speech (0.0 to 1.0).
    pub threshold: f32,
    /// Minimum duration of speech before it's considered valid (milliseconds).
    pub min_speech_ms: u32,
    /// Minimum silence duration that splits speech intervals (milliseconds).
    pub min_silence_ms: u32,
    /// Analysis window size (milliseconds).
    pub window_ms: u32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::VAD_THRESHOLD,
            min_speech_ms: defaults::MIN_SPEECH_MS,
            min_silence_ms: defaults::MIN_SILENCE_MS,
            window_ms: 20,
        }
    }
}

/// Windowed-RMS voice activity detector.
pub struct EnergyVad {
    config: VadConfig,
}

impl EnergyVad {
    pub fn new(config: VadConfig) -> Self {
        Self { config }
    }
}

impl Default for EnergyVad {
    fn default() -> Self {
        Self::new(VadConfig::default())
    }
}

impl SpeechDetector for EnergyVad {
    fn detect(&self, samples: &[i16], sample_rate: u32) -> Vec<SpeechInterval> {
        if samples.is_empty() || sample_rate == 0 {
            return Vec::new();
        }

        let window =
            ((self.config.window_ms as u64 * sample_rate as u64) / 1000).max(1) as usize;
        let min_speech =
            ((self.config.min_speech_ms as u64 * sample_rate as u64) / 1000) as usize;
        let min_silence =
            ((self.config.min_silence_ms as u64 * sample_rate as u64) / 1000) as usize;

        // Raw speech runs from window classification
        let mut runs: Vec<SpeechInterval> = Vec::new();
        let mut idx = 0;
        while idx < samples.len() {
            let end = (idx + window).min(samples.len());
            if calculate_rms(&samples[idx..end]) > self.config.threshold {
                match runs.last_mut() {
                    Some(last) if last.end == idx => last.end = end,
                    _ => runs.push(SpeechInterval { start: idx, end }),
                }
            }
            idx = end;
        }

        // Bridge silences shorter than min_silence
        let mut bridged: Vec<SpeechInterval> = Vec::new();
        for run in runs {
            match bridged.last_mut() {
                Some(last) if run.start - last.end < min_silence => last.end = run.end,
                _ => bridged.push(run),
            }
        }

        // Drop speech runs shorter than min_speech
        bridged.retain(|r| r.len() >= min_speech);
        bridged
    }
}

/// Calculates the Root Mean Square (RMS) of audio samples.
///
/// Returns a normalized value (0.0 to 1.0) where 0.0 is silence and 1.0 is
/// maximum amplitude.
pub fn calculate_rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let normalized = sample as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    let mean_square = sum_squares / samples.len() as f64;
    mean_square.sqrt() as f32
}
