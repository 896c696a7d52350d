//! pomodoro-sounds: generates or downloads the Pomodoro CLI notification sounds.
//!
//! Subcommands:
//! - generate (default): synthesize WAV files
//! - fetch: download bell sounds, with manual instructions on failure
//! - catalog: print a built-in sound catalog as JSON
//! - inspect: show a WAV file's header and peak level

use std::path::Path;

use tracing_subscriber::EnvFilter;

use pomodoro_sounds::assets::{generate_all, generate_all_to, Catalog};
use pomodoro_sounds::audio::{read_wav, samples_to_duration};
use pomodoro_sounds::cli::{Cli, Command, FetchArgs, GenerateArgs};
use pomodoro_sounds::config::{FetchConfig, SynthConfig};
use pomodoro_sounds::error::{Result, SoundError};
use pomodoro_sounds::fetch::fetch_all;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match Cli::parse_args().command_or_default() {
        Command::Generate(args) => run_generate(&args),
        Command::Fetch(args) => run_fetch(&args),
        Command::Catalog { style } => {
            println!("{}", Catalog::builtin(style.into()).to_json()?);
            Ok(())
        }
        Command::Inspect { path } => run_inspect(&path),
    }
}

/// Renders the selected catalog into the output directory.
fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = args.apply(SynthConfig::from_env());

    let catalog = match args.catalog {
        Some(ref path) => Catalog::load(path)?,
        None => Catalog::builtin(config.style),
    };

    // With --report, stdout carries only the JSON
    if args.report {
        let written = generate_all_to(&catalog, &config, &mut std::io::stderr())?;
        let json =
            serde_json::to_string_pretty(&written).map_err(SoundError::json_encode_failed)?;
        println!("{}", json);
    } else {
        generate_all(&catalog, &config)?;
    }

    Ok(())
}

/// Tries each download once. Failed downloads do not change the exit code.
fn run_fetch(args: &FetchArgs) -> Result<()> {
    let config = args.apply(FetchConfig::from_env());
    let results = fetch_all(&args.entries(), &config)?;

    let downloaded = results.iter().filter(|(_, outcome)| outcome.is_success()).count();
    println!("{}/{} sounds downloaded", downloaded, results.len());

    Ok(())
}

/// Prints the header fields and peak level of a WAV file.
fn run_inspect(path: &Path) -> Result<()> {
    let (info, samples) = read_wav(path)?;
    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
    let peak_dbfs = 20.0 * (peak as f32 / 32767.0).log10();

    println!("File: {}", path.display());
    println!("  Channels: {}", info.channels);
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!("  Bits per sample: {}", info.bits_per_sample);
    println!("  Frames: {}", info.frames);
    println!(
        "  Duration: {:.3}s",
        samples_to_duration(info.frames as usize, info.sample_rate)
    );
    println!("  Peak: {} ({:.1} dBFS)", peak, peak_dbfs);

    Ok(())
}
