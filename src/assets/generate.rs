//! Renders a catalog into WAV files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use super::catalog::Catalog;
use super::report::GeneratedAsset;
use super::spec::AssetSpec;
use crate::audio::write_wav;
use crate::config::SynthConfig;
use crate::error::{ErrorCode, Result, SoundError};

/// Validates and renders one asset to float samples.
pub fn render_asset(asset: &AssetSpec, sample_rate: u32) -> Result<Vec<f32>> {
    if let Some(reason) = asset.validate(sample_rate) {
        return Err(SoundError::invalid_sound(&asset.name, reason));
    }
    Ok(asset.arrangement.render(sample_rate))
}

/// Renders one asset and writes it to `output_dir/<filename>`.
///
/// An existing file with the same name is overwritten.
pub fn generate_asset(
    asset: &AssetSpec,
    output_dir: &Path,
    sample_rate: u32,
) -> Result<GeneratedAsset> {
    let samples = render_asset(asset, sample_rate)?;
    let path = output_dir.join(&asset.filename);

    debug!(
        asset = %asset.name,
        frames = samples.len(),
        path = %path.display(),
        "writing sound"
    );
    write_wav(&samples, &path, sample_rate)?;

    Ok(GeneratedAsset::new(asset.name.clone(), path, &samples, sample_rate))
}

/// Generates every asset of `catalog` into the configured output directory,
/// printing progress to stdout.
///
/// The directory is created if missing. Assets are written in catalog order;
/// the first failure stops the run and may leave a partial file behind.
pub fn generate_all(catalog: &Catalog, config: &SynthConfig) -> Result<Vec<GeneratedAsset>> {
    generate_all_to(catalog, config, &mut io::stdout())
}

/// Same as [`generate_all`], with progress lines written to `progress`.
///
/// Progress output is best effort; a failed write does not stop generation.
pub fn generate_all_to<W: Write>(
    catalog: &Catalog,
    config: &SynthConfig,
    progress: &mut W,
) -> Result<Vec<GeneratedAsset>> {
    if let Some(reason) = config.validate() {
        return Err(SoundError::new(ErrorCode::InvalidSound, reason));
    }

    let output_dir = config.effective_output_dir();
    fs::create_dir_all(&output_dir).map_err(|e| SoundError::output_dir_failed(&output_dir, e))?;

    writeln!(progress, "🎵 Generating copyright-free notification sounds...").ok();

    let mut written = Vec::with_capacity(catalog.assets.len());
    for asset in &catalog.assets {
        writeln!(progress, "Creating {}...", asset.description).ok();
        let generated = generate_asset(asset, &output_dir, config.sample_rate)?;
        writeln!(
            progress,
            "  ✅ {} ({:.2}s, {} frames, peak {:.1} dBFS)",
            asset.filename,
            generated.duration_sec,
            generated.frames,
            generated.peak_dbfs()
        )
        .ok();
        written.push(generated);
    }

    writeln!(progress, "Sound files generated in: {}", output_dir.display()).ok();
    writeln!(progress, "All sounds are copyright-free and safe for distribution.").ok();

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Arrangement, Style, ToneSpec};
    use crate::audio::read_wav;
    use crate::synth::Envelope;
    use tempfile::tempdir;

    fn config_for(dir: &Path, style: Style) -> SynthConfig {
        SynthConfig {
            output_dir: Some(dir.to_path_buf()),
            style,
            ..Default::default()
        }
    }

    #[test]
    fn generate_all_writes_every_asset() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("sounds");
        let config = config_for(&out, Style::Soft);

        let written = generate_all(&Catalog::builtin(Style::Soft), &config).unwrap();

        assert_eq!(written.len(), 3);
        for asset in &written {
            assert!(asset.path.exists(), "{} missing", asset.path.display());
            let (info, samples) = read_wav(&asset.path).unwrap();
            assert_eq!(info.channels, 1);
            assert_eq!(info.sample_rate, 44100);
            assert_eq!(samples.len(), asset.frames);
        }
        assert_eq!(written[0].frames, 110250);
        assert_eq!(written[1].frames, 88200);
        assert_eq!(written[2].frames, 13230 + 4410 + 13230);
    }

    #[test]
    fn progress_goes_to_the_given_writer() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), Style::Soft);
        let mut progress = Vec::new();

        let written =
            generate_all_to(&Catalog::builtin(Style::Soft), &config, &mut progress).unwrap();

        let text = String::from_utf8(progress).unwrap();
        assert!(text.starts_with("🎵 Generating"));
        for asset in &written {
            let line = text
                .lines()
                .find(|line| line.contains(&format!("✅ {}.wav", asset.name)))
                .unwrap();
            assert!(line.contains(&format!("{:.1} dBFS", asset.peak_dbfs())));
        }
    }

    #[test]
    fn rerun_overwrites_same_files() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), Style::Bell);
        let catalog = Catalog::builtin(Style::Bell);

        let first = generate_all(&catalog, &config).unwrap();
        let second = generate_all(&catalog, &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn invalid_asset_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let asset = AssetSpec {
            name: "broken".to_string(),
            filename: "broken.wav".to_string(),
            description: "broken sound".to_string(),
            arrangement: Arrangement::Chord(ToneSpec::new(vec![], 1.0, 0.3, Envelope::soft())),
        };

        let err = generate_asset(&asset, dir.path(), 44100).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSound);
        assert!(!dir.path().join("broken.wav").exists());
    }

    #[test]
    fn invalid_sample_rate_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = config_for(dir.path(), Style::Soft);
        config.sample_rate = 0;

        let err = generate_all(&Catalog::builtin(Style::Soft), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSound);
    }

    #[test]
    fn unwritable_output_dir_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();
        let config = config_for(&blocker.join("sounds"), Style::Soft);

        let err = generate_all(&Catalog::builtin(Style::Soft), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutputDirFailed);
    }
}
