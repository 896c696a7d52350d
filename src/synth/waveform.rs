//! Sine wave generation.

use std::f64::consts::TAU;

use super::envelope::Envelope;

/// Number of samples covering `duration_secs` at `sample_rate`.
///
/// Rounds to the nearest sample. Negative or NaN durations yield 0.
pub fn frame_count(duration_secs: f32, sample_rate: u32) -> usize {
    (duration_secs as f64 * sample_rate as f64).round() as usize
}

/// Generates a sine tone shaped by `envelope`.
///
/// Sample `i` is `amplitude * sin(2π * frequency * i / sample_rate)` times the
/// envelope gain. The phase is computed in f64 so long tones do not drift.
///
/// # Example
///
/// ```
/// use pomodoro_sounds::synth::{sine_wave, Envelope};
///
/// let tone = sine_wave(440.0, 0.3, 44100, 0.3, Envelope::soft());
/// assert_eq!(tone.len(), 13230);
/// assert_eq!(tone[0], 0.0);
/// ```
pub fn sine_wave(
    frequency: f32,
    duration_secs: f32,
    sample_rate: u32,
    amplitude: f32,
    envelope: Envelope,
) -> Vec<f32> {
    let len = frame_count(duration_secs, sample_rate);
    let step = TAU * frequency as f64 / sample_rate as f64;

    let mut samples: Vec<f32> = (0..len)
        .map(|i| amplitude * (step * i as f64).sin() as f32)
        .collect();

    envelope.apply(&mut samples, sample_rate);
    samples
}

/// Largest absolute sample value, 0.0 for an empty buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}
