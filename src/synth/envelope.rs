//! Amplitude envelopes.
//!
//! An envelope is a per-sample gain applied in place to a generated tone,
//! either to remove clicks at the buffer edges or to imitate a struck bell.

use serde::{Deserialize, Serialize};

use super::waveform::frame_count;

/// Edge fade length used by the soft sound set (100ms).
pub const SOFT_FADE_SECS: f32 = 0.1;

/// Fade-in length used by the bell sound set (10ms).
pub const BELL_FADE_IN_SECS: f32 = 0.01;

/// Amplitude envelope applied to a tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Constant amplitude with linear fades over the first and last
    /// `fade_secs` of the buffer.
    LinearFade {
        /// Length of each edge fade in seconds.
        fade_secs: f32,
    },

    /// Exponential decay `e^(-rate * t)` after a short linear fade-in.
    /// No fade-out: the decay already approaches silence.
    ExponentialDecay {
        /// Decay constant per second.
        rate: f32,
        /// Length of the fade-in in seconds.
        fade_in_secs: f32,
    },
}

impl Envelope {
    /// Linear edge fades of [`SOFT_FADE_SECS`].
    pub fn soft() -> Self {
        Envelope::LinearFade {
            fade_secs: SOFT_FADE_SECS,
        }
    }

    /// Exponential decay with the short bell fade-in.
    pub fn bell(rate: f32) -> Self {
        Envelope::ExponentialDecay {
            rate,
            fade_in_secs: BELL_FADE_IN_SECS,
        }
    }

    /// Returns the gain for sample `index` of a buffer of `len` samples.
    pub fn gain_at(&self, index: usize, len: usize, sample_rate: u32) -> f32 {
        match *self {
            Envelope::LinearFade { fade_secs } => {
                // Fades longer than half the buffer would overlap
                let fade = frame_count(fade_secs, sample_rate).min(len / 2);
                if fade == 0 {
                    return 1.0;
                }
                if index < fade {
                    index as f32 / fade as f32
                } else if len - index < fade {
                    (len - index) as f32 / fade as f32
                } else {
                    1.0
                }
            }
            Envelope::ExponentialDecay { rate, fade_in_secs } => {
                let t = index as f64 / sample_rate as f64;
                let decay = (-(rate as f64) * t).exp() as f32;
                let fade_in = frame_count(fade_in_secs, sample_rate).min(len);
                if index < fade_in {
                    decay * index as f32 / fade_in as f32
                } else {
                    decay
                }
            }
        }
    }

    /// Multiplies every sample by its envelope gain.
    pub fn apply(&self, samples: &mut [f32], sample_rate: u32) {
        let len = samples.len();
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= self.gain_at(i, len, sample_rate);
        }
    }

    /// Number of samples at the start of the buffer covered by the fade-in.
    pub fn fade_in_frames(&self, len: usize, sample_rate: u32) -> usize {
        match *self {
            Envelope::LinearFade { fade_secs } => frame_count(fade_secs, sample_rate).min(len / 2),
            Envelope::ExponentialDecay { fade_in_secs, .. } => {
                frame_count(fade_in_secs, sample_rate).min(len)
            }
        }
    }

    /// Validates the envelope parameters.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        match *self {
            Envelope::LinearFade { fade_secs } => {
                if !fade_secs.is_finite() || fade_secs < 0.0 {
                    return Some(format!("fade_secs must be >= 0, got {}", fade_secs));
                }
            }
            Envelope::ExponentialDecay { rate, fade_in_secs } => {
                if !rate.is_finite() || rate <= 0.0 {
                    return Some(format!("decay rate must be > 0, got {}", rate));
                }
                if !fade_in_secs.is_finite() || fade_in_secs < 0.0 {
                    return Some(format!("fade_in_secs must be >= 0, got {}", fade_in_secs));
                }
            }
        }
        None
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::soft()
    }
}
