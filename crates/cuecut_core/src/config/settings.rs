//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Audio acquisition settings.
    #[serde(default)]
    pub download: DownloadSettings,

    /// Per-segment cutting settings.
    #[serde(default)]
    pub split: SplitSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output, cue lookup, temp, and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder for the per-job output directories.
    #[serde(default = "default_output_root")]
    pub output_root: String,

    /// Default cue file to look for when none is given on the command line.
    /// Empty means no default.
    #[serde(default)]
    pub cue_file: String,

    /// Folder for downloaded sources awaiting cutting.
    #[serde(default = "default_temp_root")]
    pub temp_root: String,

    /// Folder for run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output_root() -> String {
    "cuts".to_string()
}

fn default_temp_root() -> String {
    ".temp".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            cue_file: String::new(),
            temp_root: default_temp_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Audio acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Downloader binary to invoke.
    #[serde(default = "default_downloader")]
    pub downloader: String,

    /// Audio format requested from the downloader.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

fn default_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            downloader: default_downloader(),
            audio_format: default_audio_format(),
        }
    }
}

/// Per-segment cutting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSettings {
    /// Transcoder binary to invoke.
    #[serde(default = "default_transcoder")]
    pub transcoder: String,

    /// Extension for the output files.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Copy the audio stream instead of re-encoding.
    #[serde(default = "default_true")]
    pub copy_codec: bool,

    /// Zero-padded width of the track number prefix in output names.
    #[serde(default = "default_track_number_width")]
    pub track_number_width: u32,
}

fn default_transcoder() -> String {
    "ffmpeg".to_string()
}

fn default_extension() -> String {
    "mp3".to_string()
}

fn default_track_number_width() -> u32 {
    2
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            transcoder: default_transcoder(),
            extension: default_extension(),
            copy_codec: true,
            track_number_width: default_track_number_width(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the global subscriber.
    #[serde(default)]
    pub level: LogLevel,

    /// Use compact log format.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of output lines kept for the error tail.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    /// Show timestamps in run log lines.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
            show_timestamps: true,
        }
    }
}

impl LoggingSettings {
    /// Build the run-logger configuration from this section.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            compact: self.compact,
            progress_step: self.progress_step,
            error_tail: self.error_tail as usize,
            show_timestamps: self.show_timestamps,
        }
    }
}

/// Identifies a configuration section for atomic updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Download,
    Split,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Download => "download",
            ConfigSection::Split => "split",
            ConfigSection::Logging => "logging",
        }
    }

    /// All sections in file order.
    pub fn all() -> [ConfigSection; 4] {
        [
            ConfigSection::Paths,
            ConfigSection::Download,
            ConfigSection::Split,
            ConfigSection::Logging,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let settings = Settings::default();
        let serialized = toml::to_string_pretty(&settings).unwrap();
        let reparsed: Settings = toml::from_str(&serialized).unwrap();

        assert_eq!(reparsed.paths.output_root, settings.paths.output_root);
        assert_eq!(reparsed.download.downloader, "yt-dlp");
        assert_eq!(reparsed.split.extension, "mp3");
        assert!(reparsed.logging.compact);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let settings: Settings = toml::from_str("[paths]\noutput_root = \"albums\"\n").unwrap();
        assert_eq!(settings.paths.output_root, "albums");
        assert_eq!(settings.download.audio_format, "mp3");
        assert_eq!(settings.split.track_number_width, 2);
    }

    #[test]
    fn log_config_mirrors_section() {
        let mut section = LoggingSettings::default();
        section.compact = false;
        section.error_tail = 50;

        let config = section.to_log_config();
        assert!(!config.compact);
        assert_eq!(config.error_tail, 50);
    }
}
