//! Audio acquisition via the configured downloader.
//!
//! The downloader is invoked as a subprocess and asked to print the final
//! file path, which is the only part of its output this wrapper reads.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{ToolError, ToolResult};
use crate::config::DownloadSettings;

/// Fetches the audio track of a video URL into a local file.
pub struct AudioDownloader {
    binary: String,
    audio_format: String,
}

impl AudioDownloader {
    /// Create a downloader invoking `binary` and requesting `audio_format`.
    pub fn new(binary: impl Into<String>, audio_format: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            audio_format: audio_format.into(),
        }
    }

    /// Create a downloader from the download settings section.
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self::new(&settings.downloader, &settings.audio_format)
    }

    /// Download the audio of `url` into `dest_dir`.
    ///
    /// Returns the path of the produced file as printed by the tool.
    pub fn download(&self, url: &str, dest_dir: &Path) -> ToolResult<PathBuf> {
        fs::create_dir_all(dest_dir)?;

        let template = dest_dir.join("%(title)s.%(ext)s");

        tracing::debug!("Downloading audio from {} via {}", url, self.binary);

        let output = Command::new(&self.binary)
            .arg("--extract-audio")
            .args(["--audio-format", &self.audio_format])
            .arg("--output")
            .arg(&template)
            .args(["--print", "after_move:filepath"])
            .arg("--no-simulate")
            .arg(url)
            .output()
            .map_err(|e| ToolError::LaunchFailed {
                tool: self.binary.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::CommandFailed {
                tool: self.binary.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ToolError::MalformedOutput {
                tool: self.binary.clone(),
                message: "no output file path printed".to_string(),
            })?;

        if !path.exists() {
            return Err(ToolError::FileNotFound(path));
        }

        Ok(path)
    }
}
