//! Transcript output writing.

use crate::error::Result;
use crate::transcript::Transcript;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write a transcript as pretty-printed JSON next to the input's stem.
///
/// `speech.wav` becomes `<output_dir>/speech.json`. An existing file with
/// that name is overwritten. Returns the path written.
pub fn write_transcript(
    transcript: &Transcript,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    let path = output_dir.join(format!("{stem}.json"));

    let file = fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, transcript)
        .map_err(|e| std::io::Error::other(format!("Failed to serialize transcript: {}", e)))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(path)
}
