//! WAV decoding for batch input and chunk staging.
//!
//! Supports arbitrary sample rates and channel counts, downmixing and
//! resampling everything to 16kHz mono before the pipeline sees it.

use crate::defaults::SAMPLE_RATE;
use crate::error::{Result, VadscribeError};
use std::io::Read;
use std::path::Path;

/// Decoded mono audio at the pipeline sample rate.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a WAV file into a 16kHz mono buffer.
pub fn load_wav(path: &Path) -> Result<AudioBuffer> {
    let file = std::fs::File::open(path)?;
    from_reader(std::io::BufReader::new(file))
}

/// Decode WAV data from any reader into a 16kHz mono buffer.
pub fn from_reader(reader: impl Read) -> Result<AudioBuffer> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| VadscribeError::AudioDecode {
        message: format!("Failed to parse WAV file: {}", e),
    })?;

    let spec = wav_reader.spec();
    let source_rate = spec.sample_rate;
    let source_channels = spec.channels;

    let raw_samples: Vec<i16> = wav_reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| VadscribeError::AudioDecode {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    // Downmix to mono if stereo
    let mono_samples = if source_channels == 2 {
        raw_samples
            .chunks_exact(2)
            .map(|chunk| {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                ((left + right) / 2) as i16
            })
            .collect()
    } else {
        raw_samples
    };

    // Resample to 16kHz if needed
    let samples = if source_rate != SAMPLE_RATE {
        resample(&mono_samples, source_rate, SAMPLE_RATE)
    } else {
        mono_samples
    };

    Ok(AudioBuffer {
        samples,
        sample_rate: SAMPLE_RATE,
    })
}

/// Write a mono sample slice as a 16-bit PCM WAV file.
///
/// Used for staging chunk files handed to the transcription engine.
pub fn write_mono_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| VadscribeError::Io(
        std::io::Error::other(format!("Failed to create staged WAV: {}", e)),
    ))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| VadscribeError::Io(std::io::Error::other(format!(
                "Failed to write staged WAV: {}",
                e
            ))))?;
    }
    writer
        .finalize()
        .map_err(|e| VadscribeError::Io(std::io::Error::other(format!(
            "Failed to finalize staged WAV: {}",
            e
        ))))?;
    Ok(())
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
