//! Record of a written sound file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audio::samples_to_duration;
use crate::synth::peak;

/// A sound file written by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    /// Asset name, e.g. "break_complete".
    pub name: String,

    /// Full filesystem path to the WAV file.
    pub path: PathBuf,

    /// Number of samples written (mono, so one per frame).
    pub frames: usize,

    /// Audio sample rate in Hz.
    pub sample_rate: u32,

    pub duration_sec: f32,

    /// Largest absolute float sample before quantization.
    pub peak: f32,
}

impl GeneratedAsset {
    /// Builds the record for `samples` written to `path`.
    pub fn new(name: impl Into<String>, path: PathBuf, samples: &[f32], sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            path,
            frames: samples.len(),
            sample_rate,
            duration_sec: samples_to_duration(samples.len(), sample_rate),
            peak: peak(samples),
        }
    }

    /// Peak level in dBFS, negative infinity for silence.
    pub fn peak_dbfs(&self) -> f32 {
        20.0 * self.peak.log10()
    }
}
