//! Error types for pomodoro-sounds.
//!
//! Defines the error codes and the error type shared by the synthesizer,
//! the WAV encoder and the catalog loader.

use std::fmt;

/// Error codes identifying the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Output directory could not be created.
    /// Trigger: Permission denied, read-only filesystem.
    OutputDirFailed,

    /// WAV file could not be created or written.
    /// Trigger: Disk full, invalid path, I/O error while finalizing.
    WavWriteFailed,

    /// WAV file could not be opened or decoded.
    /// Trigger: Missing file, unsupported sample format.
    WavReadFailed,

    /// Sound parameters are invalid.
    /// Trigger: Empty chord, non-positive duration, amplitude outside (0, 1].
    InvalidSound,

    /// Custom catalog file could not be read or parsed.
    /// Trigger: Missing file, malformed JSON.
    CatalogLoadFailed,

    /// Catalog or report could not be encoded as JSON.
    /// Trigger: Serializer failure.
    JsonEncodeFailed,

    /// Download could not be set up.
    /// Trigger: HTTP client construction failed.
    DownloadFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::OutputDirFailed => "OUTPUT_DIR_FAILED",
            ErrorCode::WavWriteFailed => "WAV_WRITE_FAILED",
            ErrorCode::WavReadFailed => "WAV_READ_FAILED",
            ErrorCode::InvalidSound => "INVALID_SOUND",
            ErrorCode::CatalogLoadFailed => "CATALOG_LOAD_FAILED",
            ErrorCode::JsonEncodeFailed => "JSON_ENCODE_FAILED",
            ErrorCode::DownloadFailed => "DOWNLOAD_FAILED",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::OutputDirFailed => "Failed to create the sound output directory",
            ErrorCode::WavWriteFailed => "Failed to write a WAV file",
            ErrorCode::WavReadFailed => "Failed to read a WAV file",
            ErrorCode::InvalidSound => "Sound parameters are invalid",
            ErrorCode::CatalogLoadFailed => "Failed to load the sound catalog",
            ErrorCode::JsonEncodeFailed => "Failed to encode JSON output",
            ErrorCode::DownloadFailed => "Failed to prepare the download",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::OutputDirFailed => {
                "Check write permissions for the output directory, \
                 or pass --output-dir to choose another location"
            }
            ErrorCode::WavWriteFailed => {
                "Check free disk space and that the target path is writable. \
                 A partially written file may need to be removed"
            }
            ErrorCode::WavReadFailed => {
                "Verify the file exists and is a mono 16-bit PCM WAV file"
            }
            ErrorCode::InvalidSound => {
                "Use at least one frequency, a positive duration, \
                 and an amplitude between 0 and 1"
            }
            ErrorCode::CatalogLoadFailed => {
                "Check the catalog path and compare its layout with \
                 `pomodoro-sounds catalog` output"
            }
            ErrorCode::JsonEncodeFailed => "Rerun without --report or report this as a bug",
            ErrorCode::DownloadFailed => {
                "Check TLS support on this system or download the sound manually"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for sound generation.
#[derive(Debug)]
pub struct SoundError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SoundError {
    /// Creates a new SoundError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new SoundError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an OUTPUT_DIR_FAILED error.
    pub fn output_dir_failed(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::OutputDirFailed,
            format!("Failed to create directory {}: {}", path.display(), source),
            source,
        )
    }

    /// Creates a WAV_WRITE_FAILED error.
    pub fn wav_write_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::WavWriteFailed,
            format!("WAV write failed: {}", reason.into()),
        )
    }

    /// Creates a WAV_READ_FAILED error.
    pub fn wav_read_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::WavReadFailed,
            format!("WAV read failed: {}", reason.into()),
        )
    }

    /// Creates an INVALID_SOUND error.
    pub fn invalid_sound(name: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidSound,
            format!("Invalid sound '{}': {}", name, reason.into()),
        )
    }

    /// Creates a CATALOG_LOAD_FAILED error.
    pub fn catalog_load_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CatalogLoadFailed,
            format!("Failed to load catalog: {}", reason.into()),
        )
    }

    /// Creates a JSON_ENCODE_FAILED error.
    pub fn json_encode_failed(source: serde_json::Error) -> Self {
        Self::with_source(
            ErrorCode::JsonEncodeFailed,
            format!("Failed to encode JSON: {}", source),
            source,
        )
    }

    /// Creates a DOWNLOAD_FAILED error.
    pub fn download_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DownloadFailed,
            format!("Download setup failed: {}", reason.into()),
        )
    }
}

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for SoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using SoundError.
pub type Result<T> = std::result::Result<T, SoundError>;
