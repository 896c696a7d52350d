//! Audio output module.
//!
//! Provides 16-bit PCM WAV encoding for generated sounds.

pub mod wav;

// Re-export commonly used items
pub use wav::{
    quantize, read_wav, samples_to_duration, to_pcm_i16, write_wav, write_wav_to_buffer,
    WavInfo, BITS_PER_SAMPLE, CHANNELS, MAX_FRAMES,
};
