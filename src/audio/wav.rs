//! WAV file writer for notification sounds.
//!
//! Quantizes float samples to 16-bit PCM and writes mono WAV files using the
//! hound crate.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;

use crate::error::{Result, SoundError};

/// Number of audio channels (mono).
pub const CHANNELS: u16 = 1;

/// Bit depth of written samples.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Scale applied to float samples before rounding to i16.
pub const PCM_SCALE: f32 = 32767.0;

/// Most frames one file can hold. RIFF chunk sizes are 32-bit and include
/// the 44-byte header.
pub const MAX_FRAMES: usize = (u32::MAX as usize - 44) / (BITS_PER_SAMPLE as usize / 8);

/// Returns the WAV header spec for mono 16-bit PCM at `sample_rate`.
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Converts one float sample to 16-bit PCM.
///
/// Values outside [-1, 1] are clamped to ±32767 instead of wrapping.
pub fn quantize(sample: f32) -> i16 {
    (sample * PCM_SCALE).round().clamp(-PCM_SCALE, PCM_SCALE) as i16
}

/// Converts a float buffer to 16-bit PCM.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| quantize(s)).collect()
}

/// Writes audio samples to a mono 16-bit WAV file.
///
/// # Arguments
///
/// * `samples` - Audio samples as f32 values in [-1, 1]
/// * `path` - Output file path
/// * `sample_rate` - Sample rate in Hz (44100 for the built-in sounds)
///
/// # Example
///
/// ```ignore
/// use pomodoro_sounds::audio::write_wav;
///
/// let samples = vec![0.0, 0.5, -0.5, 0.0];
/// write_wav(&samples, Path::new("/tmp/test.wav"), 44100)?;
/// ```
pub fn write_wav(samples: &[f32], path: &Path, sample_rate: u32) -> Result<()> {
    let mut writer = WavWriter::create(path, wav_spec(sample_rate)).map_err(|e| {
        SoundError::wav_write_failed(format!("Failed to create {}: {}", path.display(), e))
    })?;

    for sample in to_pcm_i16(samples) {
        writer.write_sample(sample).map_err(|e| {
            SoundError::wav_write_failed(format!("Failed to write sample: {}", e))
        })?;
    }

    writer.finalize().map_err(|e| {
        SoundError::wav_write_failed(format!("Failed to finalize {}: {}", path.display(), e))
    })?;

    Ok(())
}

/// Writes audio samples to an in-memory WAV buffer.
///
/// Returns the WAV file contents as a byte vector.
pub fn write_wav_to_buffer(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());

    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec(sample_rate)).map_err(|e| {
            SoundError::wav_write_failed(format!("Failed to create WAV writer: {}", e))
        })?;

        for sample in to_pcm_i16(samples) {
            writer.write_sample(sample).map_err(|e| {
                SoundError::wav_write_failed(format!("Failed to write sample: {}", e))
            })?;
        }

        writer.finalize().map_err(|e| {
            SoundError::wav_write_failed(format!("Failed to finalize WAV buffer: {}", e))
        })?;
    }

    Ok(cursor.into_inner())
}

/// Header fields of a decoded WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Samples per channel.
    pub frames: u32,
}

/// Reads a mono 16-bit integer WAV file back into PCM samples.
pub fn read_wav(path: &Path) -> Result<(WavInfo, Vec<i16>)> {
    let mut reader = WavReader::open(path).map_err(|e| {
        SoundError::wav_read_failed(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let spec = reader.spec();
    if spec.channels != CHANNELS {
        return Err(SoundError::wav_read_failed(format!(
            "{} has {} channels, expected mono",
            path.display(),
            spec.channels
        )));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(SoundError::wav_read_failed(format!(
            "{} is not 16-bit PCM ({:?}, {} bits)",
            path.display(),
            spec.sample_format,
            spec.bits_per_sample
        )));
    }

    let info = WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        frames: reader.duration(),
    };

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| SoundError::wav_read_failed(format!("Failed to decode samples: {}", e)))?;

    Ok((info, samples))
}

/// Calculates the duration of audio in seconds from sample count.
pub fn samples_to_duration(sample_count: usize, sample_rate: u32) -> f32 {
    sample_count as f32 / sample_rate as f32
}
