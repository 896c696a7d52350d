//! Runtime configuration.
//!
//! Output locations, sample rate and sound style for the synthesizer, and
//! network settings for the fetcher. Values come from defaults, then
//! environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::assets::Style;
use crate::synth::DEFAULT_SAMPLE_RATE;

/// Sounds directory of the Pomodoro CLI, relative to the repository root.
pub const DEFAULT_OUTPUT_DIR: &str = "internal/audio/sounds";

/// Browser-like User-Agent sent with downloads.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Default network timeout for downloads in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Synthesizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Directory for generated WAV files.
    /// If None, uses [`DEFAULT_OUTPUT_DIR`].
    pub output_dir: Option<PathBuf>,

    /// Sample rate in Hz for every generated file.
    pub sample_rate: u32,

    /// Built-in sound set to render.
    pub style: Style,
}

impl SynthConfig {
    /// Creates a new SynthConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a SynthConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `POMODORO_SOUNDS_DIR` - Output directory
    /// - `POMODORO_SOUNDS_SAMPLE_RATE` - Sample rate in Hz
    /// - `POMODORO_SOUNDS_STYLE` - Sound set (soft, bell)
    ///
    /// Falls back to defaults for unset or unparsable variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("POMODORO_SOUNDS_DIR") {
            config.output_dir = Some(PathBuf::from(path));
        }

        if let Ok(rate_str) = std::env::var("POMODORO_SOUNDS_SAMPLE_RATE") {
            if let Ok(rate) = rate_str.parse::<u32>() {
                config.sample_rate = rate;
            }
        }

        if let Ok(style_str) = std::env::var("POMODORO_SOUNDS_STYLE") {
            if let Some(style) = Style::parse(&style_str) {
                config.style = style;
            }
        }

        config
    }

    /// Returns the effective output directory.
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if !(8000..=192_000).contains(&self.sample_rate) {
            return Some(format!(
                "sample_rate must be between 8000 and 192000 Hz, got {}",
                self.sample_rate
            ));
        }

        None
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            style: Style::default(),
        }
    }
}

/// Fetcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Directory for downloaded files.
    /// If None, uses [`DEFAULT_OUTPUT_DIR`].
    pub output_dir: Option<PathBuf>,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl FetchConfig {
    /// Creates a new FetchConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a FetchConfig from environment variables.
    ///
    /// Reads `POMODORO_SOUNDS_DIR` and `POMODORO_FETCH_TIMEOUT` (seconds).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("POMODORO_SOUNDS_DIR") {
            config.output_dir = Some(PathBuf::from(path));
        }

        if let Ok(timeout_str) = std::env::var("POMODORO_FETCH_TIMEOUT") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if timeout > 0 {
                    config.timeout_secs = timeout;
                }
            }
        }

        config
    }

    /// Returns the effective output directory.
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Returns the per-user custom sounds directory of the Pomodoro CLI,
/// `~/.config/pomodoro/sounds` on every platform.
///
/// Falls back to `./sounds` when the home directory cannot be determined.
pub fn user_sounds_dir() -> PathBuf {
    if let Some(base_dirs) = directories::BaseDirs::new() {
        base_dirs
            .home_dir()
            .join(".config")
            .join("pomodoro")
            .join("sounds")
    } else {
        PathBuf::from("./sounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synth_defaults() {
        let config = SynthConfig::new();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.style, Style::Soft);
        assert_eq!(
            config.effective_output_dir(),
            PathBuf::from("internal/audio/sounds")
        );
        assert!(config.validate().is_none());
    }

    #[test]
    fn synth_validation() {
        let mut config = SynthConfig::new();
        config.sample_rate = 100;
        assert!(config.validate().is_some());

        config.sample_rate = 48000;
        assert!(config.validate().is_none());
    }

    #[test]
    fn explicit_output_dir_wins() {
        let config = SynthConfig {
            output_dir: Some(PathBuf::from("/tmp/sounds")),
            ..Default::default()
        };
        assert_eq!(config.effective_output_dir(), PathBuf::from("/tmp/sounds"));
    }

    #[test]
    fn fetch_defaults() {
        let config = FetchConfig::new();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Mozilla/5.0 (Macintosh"));
        assert_eq!(
            config.effective_output_dir(),
            PathBuf::from(DEFAULT_OUTPUT_DIR)
        );
    }

    #[test]
    fn user_sounds_dir_is_under_dot_config() {
        let path = user_sounds_dir();
        match directories::BaseDirs::new() {
            Some(base_dirs) => {
                let suffix = std::path::Path::new(".config").join("pomodoro").join("sounds");
                assert!(path.starts_with(base_dirs.home_dir()));
                assert!(path.ends_with(suffix));
            }
            None => assert_eq!(path, PathBuf::from("./sounds")),
        }
    }
}
