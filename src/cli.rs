//! Command-line interface.
//!
//! With no subcommand the binary generates the built-in soft sound set into
//! the default sounds directory.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::assets::Style;
use crate::config::{user_sounds_dir, FetchConfig, SynthConfig};
use crate::fetch::{known_sounds, DownloadEntry};

/// Sound set selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// Sustained tones with 100ms linear fades
    #[default]
    Soft,
    /// Struck-bell tones with exponential decay
    Bell,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Soft => Style::Soft,
            StyleArg::Bell => Style::Bell,
        }
    }
}

/// pomodoro-sounds: notification sound generator for the Pomodoro CLI
#[derive(Parser, Debug)]
#[command(name = "pomodoro-sounds")]
#[command(about = "Generate or download notification sounds for the Pomodoro CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Synthesize the notification sounds as WAV files
    Generate(GenerateArgs),

    /// Download bell sounds from freesound.org
    Fetch(FetchArgs),

    /// Print a built-in sound catalog as JSON
    Catalog {
        /// Sound set to print
        #[arg(long, value_enum, default_value_t = StyleArg::Soft)]
        style: StyleArg,
    },

    /// Show the header and peak level of a WAV file
    Inspect {
        /// WAV file to inspect
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default, PartialEq)]
pub struct GenerateArgs {
    /// Sound set to generate (overrides POMODORO_SOUNDS_STYLE)
    #[arg(short, long, value_enum)]
    pub style: Option<StyleArg>,

    /// Directory for the WAV files (default: internal/audio/sounds)
    #[arg(short, long, conflicts_with = "user")]
    pub output_dir: Option<PathBuf>,

    /// Install into the per-user custom sounds directory
    #[arg(long)]
    pub user: bool,

    /// Sample rate in Hz
    #[arg(long, value_parser = clap::value_parser!(u32).range(8000..=192000))]
    pub sample_rate: Option<u32>,

    /// JSON catalog to render instead of the built-in set
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Print a JSON report of the written files (progress moves to stderr)
    #[arg(long)]
    pub report: bool,
}

impl GenerateArgs {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: SynthConfig) -> SynthConfig {
        if let Some(style) = self.style {
            config.style = style.into();
        }
        if self.user {
            config.output_dir = Some(user_sounds_dir());
        } else if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        config
    }
}

#[derive(Args, Debug, Default, PartialEq)]
pub struct FetchArgs {
    /// Directory for downloaded files (default: internal/audio/sounds)
    #[arg(short, long, conflicts_with = "user")]
    pub output_dir: Option<PathBuf>,

    /// Install into the per-user custom sounds directory
    #[arg(long)]
    pub user: bool,

    /// Request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Download this URL instead of the known bell sounds
    #[arg(long)]
    pub url: Option<String>,

    /// File name for --url (default: last URL path segment)
    #[arg(long, requires = "url")]
    pub filename: Option<String>,
}

impl FetchArgs {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: FetchConfig) -> FetchConfig {
        if self.user {
            config.output_dir = Some(user_sounds_dir());
        } else if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }

    /// Returns the sounds to download.
    pub fn entries(&self) -> Vec<DownloadEntry> {
        match self.url {
            Some(ref url) => vec![DownloadEntry::from_url(url.clone(), self.filename.clone())],
            None => known_sounds(),
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns the subcommand, defaulting to `generate` with no flags.
    pub fn command_or_default(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_generates_defaults() {
        let cli = parse(&["pomodoro-sounds"]);
        assert_eq!(
            cli.command_or_default(),
            Command::Generate(GenerateArgs::default())
        );
    }

    #[test]
    fn generate_flags_override_config() {
        let cli = parse(&[
            "pomodoro-sounds",
            "generate",
            "--style",
            "bell",
            "--output-dir",
            "/tmp/sounds",
            "--sample-rate",
            "48000",
        ]);
        let Command::Generate(args) = cli.command_or_default() else {
            panic!("expected generate");
        };
        let config = args.apply(SynthConfig::default());
        assert_eq!(config.style, Style::Bell);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/sounds")));
        assert_eq!(config.sample_rate, 48000);
    }

    #[test]
    fn generate_without_flags_keeps_config() {
        let base = SynthConfig {
            style: Style::Bell,
            ..Default::default()
        };
        let config = GenerateArgs::default().apply(base.clone());
        assert_eq!(config, base);
    }

    #[test]
    fn user_flag_targets_user_dir() {
        let cli = parse(&["pomodoro-sounds", "generate", "--user"]);
        let Command::Generate(args) = cli.command_or_default() else {
            panic!("expected generate");
        };
        let config = args.apply(SynthConfig::default());
        assert_eq!(config.output_dir, Some(user_sounds_dir()));
    }

    #[test]
    fn user_and_output_dir_conflict() {
        let result = Cli::try_parse_from(["pomodoro-sounds", "generate", "--user", "-o", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn sample_rate_range_checked() {
        let result = Cli::try_parse_from(["pomodoro-sounds", "generate", "--sample-rate", "100"]);
        assert!(result.is_err());
    }

    #[test]
    fn report_flag_parses() {
        let cli = parse(&["pomodoro-sounds", "generate", "--report"]);
        let Command::Generate(args) = cli.command_or_default() else {
            panic!("expected generate");
        };
        assert!(args.report);
        assert!(!GenerateArgs::default().report);
    }

    #[test]
    fn fetch_defaults_to_known_sounds() {
        let cli = parse(&["pomodoro-sounds", "fetch"]);
        let Command::Fetch(args) = cli.command_or_default() else {
            panic!("expected fetch");
        };
        assert_eq!(args.entries(), known_sounds());
        assert_eq!(args.apply(FetchConfig::default()).timeout_secs, 30);
    }

    #[test]
    fn fetch_custom_url() {
        let cli = parse(&[
            "pomodoro-sounds",
            "fetch",
            "--url",
            "https://example.com/ding.mp3",
            "--timeout",
            "5",
        ]);
        let Command::Fetch(args) = cli.command_or_default() else {
            panic!("expected fetch");
        };
        let entries = args.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "ding.mp3");
        assert_eq!(args.apply(FetchConfig::default()).timeout_secs, 5);
    }

    #[test]
    fn filename_requires_url() {
        let result = Cli::try_parse_from(["pomodoro-sounds", "fetch", "--filename", "a.mp3"]);
        assert!(result.is_err());
    }

    #[test]
    fn catalog_and_inspect() {
        let cli = parse(&["pomodoro-sounds", "catalog", "--style", "bell"]);
        assert_eq!(
            cli.command_or_default(),
            Command::Catalog {
                style: StyleArg::Bell
            }
        );

        let cli = parse(&["pomodoro-sounds", "inspect", "a.wav"]);
        assert_eq!(
            cli.command_or_default(),
            Command::Inspect {
                path: PathBuf::from("a.wav")
            }
        );
    }
}
