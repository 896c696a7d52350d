//! Downloader for third-party notification sounds.
//!
//! Performs one blocking GET per sound and writes the body verbatim. Failures
//! are reported as a [`FetchOutcome`] and never abort the run.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::{Result, SoundError};

/// A sound that can be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadEntry {
    /// Direct file URL.
    pub url: String,

    /// File name inside the sounds directory.
    pub filename: String,

    pub description: String,

    /// Human-facing page for manual download, if known.
    pub page_url: Option<String>,
}

impl DownloadEntry {
    /// Creates an entry for an arbitrary URL.
    ///
    /// If `filename` is None, the last path segment of the URL is used.
    pub fn from_url(url: impl Into<String>, filename: Option<String>) -> Self {
        let url = url.into();
        let filename = filename.unwrap_or_else(|| filename_from_url(&url));
        Self {
            description: format!("Custom sound from {}", url),
            url,
            filename,
            page_url: None,
        }
    }
}

/// Sounds known to work as notification bells.
pub fn known_sounds() -> Vec<DownloadEntry> {
    vec![DownloadEntry {
        url: "https://freesound.org/data/previews/571/571512_11450107-lq.mp3".to_string(),
        filename: "pomodoro_complete.mp3".to_string(),
        description: "Soft notification bell by LegitCheese (CC0)".to_string(),
        page_url: Some("https://freesound.org/people/LegitCheese/sounds/571512/".to_string()),
    }]
}

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The body was written to `path`.
    Downloaded { path: PathBuf, bytes: u64 },

    /// The server wants a logged-in user; the file has to be fetched by hand.
    ManualStepRequired { status: u16, instructions: String },

    /// Network, HTTP or filesystem failure.
    Failed { reason: String },
}

impl FetchOutcome {
    /// Returns true if the file was downloaded.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded { .. })
    }
}

/// Builds the blocking HTTP client used for all downloads.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| SoundError::download_failed(format!("Failed to create HTTP client: {}", e)))
}

/// Downloads one sound into `output_dir`.
///
/// Prints progress and the outcome. The parent directory is created if
/// missing. A failure after the file was opened leaves a partial file.
pub fn download_sound(client: &Client, entry: &DownloadEntry, output_dir: &Path) -> FetchOutcome {
    let dest = output_dir.join(&entry.filename);

    println!("📥 Downloading: {}", entry.description);
    println!("   URL: {}", entry.url);
    println!("   Saving as: {}", entry.filename);

    let outcome = match download_to(client, &entry.url, &dest) {
        Ok(bytes) => FetchOutcome::Downloaded { path: dest, bytes },
        Err(DownloadError::AuthRequired(status)) => FetchOutcome::ManualStepRequired {
            status: status.as_u16(),
            instructions: manual_instructions(entry),
        },
        Err(DownloadError::Other(reason)) => FetchOutcome::Failed { reason },
    };

    match &outcome {
        FetchOutcome::Downloaded { bytes, .. } => {
            println!("✅ Downloaded successfully: {}", entry.filename);
            debug!(url = %entry.url, bytes, "download complete");
        }
        FetchOutcome::ManualStepRequired { status, .. } => {
            println!(
                "❌ Failed to download {}: HTTP {} (authentication required)",
                entry.filename, status
            );
            warn!(url = %entry.url, status, "download requires authentication");
        }
        FetchOutcome::Failed { reason } => {
            println!("❌ Failed to download {}: {}", entry.filename, reason);
            warn!(url = %entry.url, %reason, "download failed");
        }
    }

    outcome
}

/// Attempts every entry once, then prints manual download help.
///
/// Only client construction can fail; individual download failures are
/// returned as outcomes alongside their entries.
pub fn fetch_all(
    entries: &[DownloadEntry],
    config: &FetchConfig,
) -> Result<Vec<(DownloadEntry, FetchOutcome)>> {
    let client = build_client(config)?;
    let output_dir = config.effective_output_dir();

    println!("🔔 Downloading free bell notification sounds");
    println!("All sounds are Creative Commons licensed and free to use.");
    println!();

    let results: Vec<(DownloadEntry, FetchOutcome)> = entries
        .iter()
        .map(|entry| (entry.clone(), download_sound(&client, entry, &output_dir)))
        .collect();

    let pending: Vec<&DownloadEntry> = results
        .iter()
        .filter(|(_, outcome)| !outcome.is_success())
        .map(|(entry, _)| entry)
        .collect();

    if !pending.is_empty() {
        println!();
        println!("ℹ️  Some sounds could not be downloaded automatically.");
        println!("Freesound.org requires user authentication for downloads.");
        println!("Manual download instructions:");
        println!();
        for entry in pending {
            println!("{}", manual_instructions(entry));
            println!();
        }
        print_search_hints();
    }

    Ok(results)
}

/// Step-by-step instructions for fetching `entry` by hand.
pub fn manual_instructions(entry: &DownloadEntry) -> String {
    let page = entry.page_url.as_deref().unwrap_or(&entry.url);
    format!(
        "1. Visit: {}\n\
         2. Click 'Download' button (you may need to create free account)\n\
         3. Save as: {}\n\
         4. Description: {}",
        page, entry.filename, entry.description
    )
}

fn print_search_hints() {
    println!("Alternative sounds to search for on freesound.org:");
    println!("- Search: 'bell notification' + Filter: CC0 license");
    println!("- Search: 'soft ding' + Filter: CC0 license");
    println!("- Search: 'gentle chime' + Filter: CC0 license");
    println!();
    println!("🎯 Recommended: 0.5-2 seconds duration, quiet volume, pleasant tone");
}

enum DownloadError {
    AuthRequired(StatusCode),
    Other(String),
}

/// Streams `url` into `dest`, returning the number of bytes written.
fn download_to(client: &Client, url: &str, dest: &Path) -> std::result::Result<u64, DownloadError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DownloadError::Other(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| DownloadError::Other(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DownloadError::AuthRequired(status));
    }
    if !status.is_success() {
        return Err(DownloadError::Other(format!("HTTP {} for {}", status, url)));
    }

    let mut file = fs::File::create(dest).map_err(|e| {
        DownloadError::Other(format!("Failed to create file {}: {}", dest.display(), e))
    })?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; 65536]; // 64KB buffer

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| DownloadError::Other(format!("Failed to read response: {}", e)))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| DownloadError::Other(format!("Failed to write file: {}", e)))?;

        downloaded += bytes_read as u64;
    }

    Ok(downloaded)
}

fn filename_from_url(url: &str) -> String {
    url.split(|c| c == '?' || c == '#')
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("download.mp3")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use tempfile::tempdir;

    /// Serves one canned HTTP response and reports the request headers.
    fn serve_once(
        status_line: &'static str,
        body: &'static [u8],
    ) -> (String, mpsc::Receiver<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end().to_string();
                if line.is_empty() {
                    break;
                }
                headers.push(line);
            }
            let head = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            tx.send(headers).unwrap();
        });

        (format!("http://{}/bell.mp3", addr), rx)
    }

    /// Same settings as `build_client`, but never routed through a proxy.
    fn local_client(config: &FetchConfig) -> Client {
        Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .no_proxy()
            .build()
            .unwrap()
    }

    fn entry(url: &str) -> DownloadEntry {
        DownloadEntry {
            url: url.to_string(),
            filename: "bell.mp3".to_string(),
            description: "test bell".to_string(),
            page_url: Some("https://example.com/bell".to_string()),
        }
    }

    #[test]
    fn downloads_body_verbatim_with_user_agent() {
        let (url, headers) = serve_once("HTTP/1.1 200 OK", b"ID3fake-mp3-bytes");
        let dir = tempdir().unwrap();
        let out = dir.path().join("sounds");
        let client = local_client(&FetchConfig::default());

        let outcome = download_sound(&client, &entry(&url), &out);

        let path = out.join("bell.mp3");
        assert_eq!(
            outcome,
            FetchOutcome::Downloaded {
                path: path.clone(),
                bytes: 17
            }
        );
        assert_eq!(fs::read(&path).unwrap(), b"ID3fake-mp3-bytes");

        let headers = headers.recv().unwrap();
        let agent = headers
            .iter()
            .find(|h| h.to_lowercase().starts_with("user-agent:"))
            .unwrap();
        assert!(agent.contains(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
        ));
    }

    #[test]
    fn forbidden_requires_manual_step() {
        let (url, _headers) = serve_once("HTTP/1.1 403 Forbidden", b"login required");
        let dir = tempdir().unwrap();
        let client = local_client(&FetchConfig::default());

        let outcome = download_sound(&client, &entry(&url), dir.path());

        match outcome {
            FetchOutcome::ManualStepRequired { status, instructions } => {
                assert_eq!(status, 403);
                assert!(instructions.contains("https://example.com/bell"));
                assert!(instructions.contains("Save as: bell.mp3"));
            }
            other => panic!("expected manual step, got {:?}", other),
        }
        assert!(!dir.path().join("bell.mp3").exists());
    }

    #[test]
    fn server_error_is_a_failure() {
        let (url, _headers) = serve_once("HTTP/1.1 500 Internal Server Error", b"");
        let dir = tempdir().unwrap();
        let client = local_client(&FetchConfig::default());

        let outcome = download_sound(&client, &entry(&url), dir.path());

        match outcome {
            FetchOutcome::Failed { reason } => assert!(reason.contains("500")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn unreachable_host_is_a_failure() {
        // Grab a free port, then close it so the connection is refused
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let dir = tempdir().unwrap();
        let config = FetchConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        let client = local_client(&config);

        let outcome = download_sound(
            &client,
            &entry(&format!("http://127.0.0.1:{}/bell.mp3", port)),
            dir.path(),
        );

        assert!(!outcome.is_success());
        assert!(matches!(outcome, FetchOutcome::Failed { .. }));
        assert!(!dir.path().join("bell.mp3").exists());
    }

    #[test]
    fn fetch_all_reports_every_entry() {
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let dir = tempdir().unwrap();
        let config = FetchConfig {
            output_dir: Some(dir.path().to_path_buf()),
            timeout_secs: 5,
            ..Default::default()
        };
        let entries = vec![entry(&format!("http://127.0.0.1:{}/bell.mp3", port))];

        let results = fetch_all(&entries, &config).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, entries[0]);
        assert!(!results[0].1.is_success());
    }

    #[test]
    fn build_client_uses_config() {
        assert!(build_client(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn known_sounds_are_configured() {
        let sounds = known_sounds();
        assert!(!sounds.is_empty());
        for sound in sounds {
            assert!(sound.url.starts_with("https://"));
            assert!(sound.filename.ends_with(".mp3"));
            assert!(sound.page_url.is_some());
        }
    }

    #[test]
    fn filename_derived_from_url() {
        assert_eq!(filename_from_url("https://x.org/a/b/ding.mp3"), "ding.mp3");
        assert_eq!(filename_from_url("https://x.org/a/ding.wav?token=1"), "ding.wav");
        assert_eq!(filename_from_url("https://x.org/"), "download.mp3");

        let custom = DownloadEntry::from_url("https://x.org/chime.mp3", None);
        assert_eq!(custom.filename, "chime.mp3");
        let named =
            DownloadEntry::from_url("https://x.org/chime.mp3", Some("bell.mp3".to_string()));
        assert_eq!(named.filename, "bell.mp3");
    }
}
