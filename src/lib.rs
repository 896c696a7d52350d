//! pomodoro-sounds: notification sounds for the Pomodoro CLI.
//!
//! This library synthesizes the timer's notification sounds as mono 16-bit
//! WAV files and can try to download a bell sound from freesound.org.
//!
//! # Modules
//!
//! - [`synth`]: Sine generation, envelopes, chord mixing
//! - [`audio`]: 16-bit PCM WAV encoding
//! - [`assets`]: Per-sound configuration, built-in catalogs, orchestration
//! - [`fetch`]: One-shot downloads with manual fallback instructions
//! - [`config`]: Runtime configuration (SynthConfig, FetchConfig)
//! - [`error`]: Error types and codes (SoundError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use pomodoro_sounds::{
//!     assets::{generate_all, Catalog, Style},
//!     config::SynthConfig,
//! };
//!
//! let config = SynthConfig {
//!     style: Style::Bell,
//!     ..Default::default()
//! };
//! let written = generate_all(&Catalog::builtin(config.style), &config)?;
//! ```

pub mod assets;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod synth;

// Re-export commonly used types at crate root for convenience
pub use assets::{generate_all, AssetSpec, Catalog, GeneratedAsset, Style, ToneSpec};
pub use config::{FetchConfig, SynthConfig};
pub use error::{ErrorCode, Result, SoundError};
pub use fetch::{fetch_all, FetchOutcome};
