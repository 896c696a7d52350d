//! Built-in sound catalogs and JSON catalog loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::spec::{Arrangement, AssetSpec, Segment, ToneSpec};
use crate::error::{Result, SoundError};
use crate::synth::Envelope;

/// C5, the fundamental of the completion bell.
const C5: f32 = 523.25;
/// A4, the first note of the session start cue.
const A4: f32 = 440.0;
/// C major triad (C4, E4, G4).
const C_MAJOR: [f32; 3] = [261.63, 329.63, 392.00];

/// Sound set to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Sustained tones with 100ms linear edge fades.
    #[default]
    Soft,

    /// Struck-bell tones with exponential decay.
    Bell,
}

impl Style {
    /// Returns the string representation of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Soft => "soft",
            Style::Bell => "bell",
        }
    }

    /// Parses a style from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "soft" => Some(Style::Soft),
            "bell" | "decay" => Some(Style::Bell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered list of assets written by one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub assets: Vec<AssetSpec>,
}

impl Catalog {
    /// Returns the built-in catalog for `style`.
    pub fn builtin(style: Style) -> Self {
        let assets = match style {
            Style::Soft => vec![
                soft_pomodoro_complete(),
                soft_break_complete(),
                soft_session_start(),
            ],
            Style::Bell => vec![
                bell_pomodoro_complete(),
                bell_break_complete(),
                bell_session_start(),
            ],
        };
        Self { assets }
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SoundError::catalog_load_failed(format!("Cannot read {}: {}", path.display(), e))
        })?;
        parse_catalog(&contents).map_err(|reason| {
            SoundError::catalog_load_failed(format!("{}: {}", path.display(), reason))
        })
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        parse_catalog(json).map_err(SoundError::catalog_load_failed)
    }

    /// Encodes the catalog as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SoundError::json_encode_failed)
    }

    /// Looks up an asset by name.
    pub fn get(&self, name: &str) -> Option<&AssetSpec> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

fn parse_catalog(json: &str) -> std::result::Result<Catalog, String> {
    let catalog: Catalog =
        serde_json::from_str(json).map_err(|e| format!("invalid JSON: {}", e))?;
    if catalog.assets.is_empty() {
        return Err("catalog contains no assets".to_string());
    }
    Ok(catalog)
}

fn asset(name: &str, description: &str, arrangement: Arrangement) -> AssetSpec {
    AssetSpec {
        name: name.to_string(),
        filename: format!("{}.wav", name),
        description: description.to_string(),
        arrangement,
    }
}

/// Bell-like C5 with quickly fading harmonics at 2x, 3x and 5x.
///
/// Overtone `i` lasts `duration / (i + 1)` at amplitude `0.1 / i`.
fn soft_pomodoro_complete() -> AssetSpec {
    let duration = 2.5;
    let overtones = [2.0f32, 3.0, 5.0]
        .iter()
        .enumerate()
        .map(|(idx, multiple)| {
            let i = (idx + 1) as f32;
            ToneSpec::single(C5 * multiple, duration / (i + 1.0), 0.1 / i, Envelope::soft())
        })
        .collect();

    asset(
        "pomodoro_complete",
        "pomodoro completion sound",
        Arrangement::Layered {
            base: ToneSpec::single(C5, duration, 0.4, Envelope::soft()),
            overtones,
        },
    )
}

fn soft_break_complete() -> AssetSpec {
    asset(
        "break_complete",
        "break completion sound",
        Arrangement::Chord(ToneSpec::new(C_MAJOR.to_vec(), 2.0, 0.25, Envelope::soft())),
    )
}

fn soft_session_start() -> AssetSpec {
    asset(
        "session_start",
        "session start sound",
        Arrangement::Sequence {
            segments: vec![
                Segment::Tone(ToneSpec::single(A4, 0.3, 0.3, Envelope::soft())),
                Segment::Rest { duration_secs: 0.1 },
                Segment::Tone(ToneSpec::single(C5, 0.3, 0.3, Envelope::soft())),
            ],
        },
    )
}

/// 800Hz strike with decay constant 2 and two faster-decaying partials.
fn bell_pomodoro_complete() -> AssetSpec {
    let fundamental = 800.0;
    asset(
        "pomodoro_complete",
        "pomodoro completion bell",
        Arrangement::Layered {
            base: ToneSpec::single(fundamental, 1.5, 0.15, Envelope::bell(2.0)),
            overtones: vec![
                ToneSpec::single(fundamental * 2.0, 1.5, 0.05, Envelope::bell(4.0)),
                ToneSpec::single(fundamental * 3.0, 1.5, 0.025, Envelope::bell(6.0)),
            ],
        },
    )
}

fn bell_break_complete() -> AssetSpec {
    asset(
        "break_complete",
        "break completion chime",
        Arrangement::Chord(ToneSpec::new(C_MAJOR.to_vec(), 2.0, 0.25, Envelope::bell(1.5))),
    )
}

fn bell_session_start() -> AssetSpec {
    asset(
        "session_start",
        "session start ding",
        Arrangement::Sequence {
            segments: vec![
                Segment::Tone(ToneSpec::single(A4, 0.4, 0.2, Envelope::bell(4.0))),
                Segment::Rest { duration_secs: 0.05 },
                Segment::Tone(ToneSpec::single(C5, 0.4, 0.2, Envelope::bell(4.0))),
            ],
        },
    )
}
