//! Additive mixing and buffer assembly.

use super::envelope::Envelope;
use super::waveform::{frame_count, sine_wave};

/// Generates a chord by mixing one sine tone per frequency.
///
/// Every tone shares the same duration, amplitude and envelope. The sum is
/// divided by the number of frequencies, so the result never exceeds the
/// amplitude of a single tone. An empty frequency list yields silence.
pub fn chord(
    frequencies: &[f32],
    duration_secs: f32,
    sample_rate: u32,
    amplitude: f32,
    envelope: Envelope,
) -> Vec<f32> {
    let mut mixed = vec![0.0f32; frame_count(duration_secs, sample_rate)];
    if frequencies.is_empty() {
        return mixed;
    }

    for &frequency in frequencies {
        let tone = sine_wave(frequency, duration_secs, sample_rate, amplitude, envelope);
        for (out, sample) in mixed.iter_mut().zip(tone) {
            *out += sample;
        }
    }

    let count = frequencies.len() as f32;
    for sample in &mut mixed {
        *sample /= count;
    }
    mixed
}

/// Adds `layer` onto the start of `base`.
///
/// A shorter layer behaves as if zero-padded to the base length; samples of a
/// longer layer past the end of `base` are dropped.
pub fn overlay(base: &mut [f32], layer: &[f32]) {
    for (out, sample) in base.iter_mut().zip(layer) {
        *out += *sample;
    }
}

/// Zero samples covering `duration_secs`.
pub fn silence(duration_secs: f32, sample_rate: u32) -> Vec<f32> {
    vec![0.0; frame_count(duration_secs, sample_rate)]
}

/// Joins buffers end to end.
pub fn concat(buffers: &[Vec<f32>]) -> Vec<f32> {
    let total_len: usize = buffers.iter().map(|b| b.len()).sum();
    let mut result = Vec::with_capacity(total_len);
    for buffer in buffers {
        result.extend_from_slice(buffer);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::peak;

    const RATE: u32 = 44100;
    const C_MAJOR: [f32; 3] = [261.63, 329.63, 392.00];

    #[test]
    fn chord_length_and_peak() {
        let mixed = chord(&C_MAJOR, 2.0, RATE, 0.25, Envelope::soft());
        assert_eq!(mixed.len(), 88200);
        assert!(peak(&mixed) <= 0.25);
    }

    #[test]
    fn chord_never_exceeds_loudest_tone() {
        for envelope in [Envelope::soft(), Envelope::bell(1.5)] {
            let mixed = chord(&C_MAJOR, 1.0, RATE, 0.5, envelope);
            let loudest = C_MAJOR
                .iter()
                .map(|&f| peak(&sine_wave(f, 1.0, RATE, 0.5, envelope)))
                .fold(0.0f32, f32::max);
            assert!(peak(&mixed) <= loudest + 1e-6);
        }
    }

    #[test]
    fn single_frequency_chord_equals_sine() {
        let mixed = chord(&[523.25], 0.5, RATE, 0.4, Envelope::soft());
        let tone = sine_wave(523.25, 0.5, RATE, 0.4, Envelope::soft());
        assert_eq!(mixed, tone);
    }

    #[test]
    fn empty_chord_is_silent() {
        let mixed = chord(&[], 0.5, RATE, 0.4, Envelope::soft());
        assert_eq!(mixed.len(), 22050);
        assert!(mixed.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn overlay_pads_short_layer() {
        let mut base = vec![1.0f32; 5];
        overlay(&mut base, &[0.5, 0.5]);
        assert_eq!(base, vec![1.5, 1.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn overlay_truncates_long_layer() {
        let mut base = vec![0.0f32; 2];
        overlay(&mut base, &[0.1, 0.2, 0.3]);
        assert_eq!(base, vec![0.1, 0.2]);
    }

    #[test]
    fn silence_and_concat() {
        let gap = silence(0.1, RATE);
        assert_eq!(gap.len(), 4410);
        let joined = concat(&[vec![1.0; 3], gap, vec![2.0; 2]]);
        assert_eq!(joined.len(), 4415);
        assert_eq!(joined[0], 1.0);
        assert_eq!(joined[3], 0.0);
        assert_eq!(joined[4414], 2.0);
    }
}
