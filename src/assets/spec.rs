//! Sound description records.
//!
//! A [`ToneSpec`] is the unit of synthesis configuration: which frequencies,
//! how long, how loud and which envelope. An [`Arrangement`] combines tones
//! into one asset, and an [`AssetSpec`] names the asset and its output file.

use serde::{Deserialize, Serialize};

use crate::audio::MAX_FRAMES;
use crate::synth::{chord, concat, frame_count, overlay, silence, Envelope};

/// Highest amplitude a single tone may request.
pub const MAX_AMPLITUDE: f32 = 1.0;

/// Longest tone or rest, in seconds.
pub const MAX_DURATION_SECS: f32 = 60.0;

/// One tone or chord with its envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Frequencies in Hz; more than one produces an equal-weight chord.
    pub frequencies: Vec<f32>,

    /// Length in seconds.
    pub duration_secs: f32,

    /// Peak amplitude of each partial before mixing, in (0, 1].
    pub amplitude: f32,

    pub envelope: Envelope,
}

impl ToneSpec {
    /// Creates a tone spec from its parts.
    pub fn new(
        frequencies: Vec<f32>,
        duration_secs: f32,
        amplitude: f32,
        envelope: Envelope,
    ) -> Self {
        Self {
            frequencies,
            duration_secs,
            amplitude,
            envelope,
        }
    }

    /// Creates a single-frequency tone spec.
    pub fn single(frequency: f32, duration_secs: f32, amplitude: f32, envelope: Envelope) -> Self {
        Self::new(vec![frequency], duration_secs, amplitude, envelope)
    }

    /// Renders the tone into a sample buffer.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        chord(
            &self.frequencies,
            self.duration_secs,
            sample_rate,
            self.amplitude,
            self.envelope,
        )
    }

    /// Validates the tone against the target sample rate.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self, sample_rate: u32) -> Option<String> {
        if self.frequencies.is_empty() {
            return Some("at least one frequency is required".to_string());
        }

        let nyquist = sample_rate as f32 / 2.0;
        for &frequency in &self.frequencies {
            if !frequency.is_finite() || frequency <= 0.0 {
                return Some(format!("frequency must be > 0 Hz, got {}", frequency));
            }
            if frequency >= nyquist {
                return Some(format!(
                    "frequency {} Hz is at or above the Nyquist limit ({} Hz)",
                    frequency, nyquist
                ));
            }
        }

        if !(self.duration_secs > 0.0 && self.duration_secs <= MAX_DURATION_SECS) {
            return Some(format!(
                "duration must be in (0, {}] seconds, got {}",
                MAX_DURATION_SECS, self.duration_secs
            ));
        }

        if !(self.amplitude > 0.0 && self.amplitude <= MAX_AMPLITUDE) {
            return Some(format!(
                "amplitude must be in (0, {}], got {}",
                MAX_AMPLITUDE, self.amplitude
            ));
        }

        self.envelope.validate()
    }
}

/// A step in a [`Arrangement::Sequence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Tone(ToneSpec),
    Rest { duration_secs: f32 },
}

/// How the tones of an asset are combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Arrangement {
    /// A single tone or chord.
    Chord(ToneSpec),

    /// A base tone with overtones added from its start. Overtones shorter
    /// than the base are zero-padded; longer ones are cut to the base length.
    Layered {
        base: ToneSpec,
        overtones: Vec<ToneSpec>,
    },

    /// Tones and rests played one after another.
    Sequence { segments: Vec<Segment> },
}

impl Arrangement {
    /// Renders the arrangement into one sample buffer.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        match self {
            Arrangement::Chord(tone) => tone.render(sample_rate),
            Arrangement::Layered { base, overtones } => {
                let mut samples = base.render(sample_rate);
                for overtone in overtones {
                    overlay(&mut samples, &overtone.render(sample_rate));
                }
                samples
            }
            Arrangement::Sequence { segments } => {
                let parts: Vec<Vec<f32>> = segments
                    .iter()
                    .map(|segment| match segment {
                        Segment::Tone(tone) => tone.render(sample_rate),
                        Segment::Rest { duration_secs } => silence(*duration_secs, sample_rate),
                    })
                    .collect();
                concat(&parts)
            }
        }
    }

    /// Number of frames [`Arrangement::render`] produces.
    pub fn frame_len(&self, sample_rate: u32) -> usize {
        match self {
            Arrangement::Chord(tone) | Arrangement::Layered { base: tone, .. } => {
                frame_count(tone.duration_secs, sample_rate)
            }
            Arrangement::Sequence { segments } => segments
                .iter()
                .map(|segment| match segment {
                    Segment::Tone(tone) => frame_count(tone.duration_secs, sample_rate),
                    Segment::Rest { duration_secs } => frame_count(*duration_secs, sample_rate),
                })
                .fold(0usize, usize::saturating_add),
        }
    }

    /// Validates every tone in the arrangement and the total length.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self, sample_rate: u32) -> Option<String> {
        if let Some(reason) = self.validate_parts(sample_rate) {
            return Some(reason);
        }

        // Parts are bounded now, so the frame count cannot overflow
        let frames = self.frame_len(sample_rate);
        if frames > MAX_FRAMES {
            return Some(format!(
                "sound is {} frames long, a WAV file holds at most {}",
                frames, MAX_FRAMES
            ));
        }

        None
    }

    fn validate_parts(&self, sample_rate: u32) -> Option<String> {
        match self {
            Arrangement::Chord(tone) => tone.validate(sample_rate),
            Arrangement::Layered { base, overtones } => {
                if let Some(reason) = base.validate(sample_rate) {
                    return Some(format!("base: {}", reason));
                }
                overtones.iter().enumerate().find_map(|(i, overtone)| {
                    overtone
                        .validate(sample_rate)
                        .map(|reason| format!("overtone {}: {}", i + 1, reason))
                })
            }
            Arrangement::Sequence { segments } => {
                if segments.is_empty() {
                    return Some("sequence has no segments".to_string());
                }
                segments.iter().enumerate().find_map(|(i, segment)| match segment {
                    Segment::Tone(tone) => tone
                        .validate(sample_rate)
                        .map(|reason| format!("segment {}: {}", i + 1, reason)),
                    Segment::Rest { duration_secs } => {
                        if !(0.0..=MAX_DURATION_SECS).contains(duration_secs) {
                            Some(format!(
                                "segment {}: rest must be in [0, {}] seconds, got {}",
                                i + 1,
                                MAX_DURATION_SECS,
                                duration_secs
                            ))
                        } else {
                            None
                        }
                    }
                })
            }
        }
    }
}

/// A named sound written to a fixed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Identifier used by the player, e.g. "pomodoro_complete".
    pub name: String,

    /// Output file name inside the sounds directory.
    pub filename: String,

    /// Progress label printed while generating.
    pub description: String,

    pub arrangement: Arrangement,
}

impl AssetSpec {
    /// Validates the asset.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self, sample_rate: u32) -> Option<String> {
        if self.name.is_empty() {
            return Some("name cannot be empty".to_string());
        }

        if !self.filename.ends_with(".wav") {
            return Some(format!("filename must end in .wav, got '{}'", self.filename));
        }

        // Output stays inside the sounds directory
        let plain = !self.filename.contains('/')
            && !self.filename.contains('\\')
            && !self.filename.starts_with('.');
        if !plain {
            return Some(format!("filename must be a plain file name, got '{}'", self.filename));
        }

        self.arrangement.validate(sample_rate)
    }
}
