//! Tone synthesis.
//!
//! Sine generation, envelope shaping and additive mixing. All buffers are
//! mono `f32` samples in roughly [-1, 1].

pub mod envelope;
pub mod mix;
pub mod waveform;

// Re-export commonly used items
pub use envelope::{Envelope, BELL_FADE_IN_SECS, SOFT_FADE_SECS};
pub use mix::{chord, concat, overlay, silence};
pub use waveform::{frame_count, peak, sine_wave};

/// Sample rate used for every built-in sound (44.1kHz).
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
