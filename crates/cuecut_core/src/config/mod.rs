//! Configuration management for CueCut.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only the changed section is modified)
//! - Defaults applied on load for missing keys
//!
//! # Example
//!
//! ```no_run
//! use cuecut_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new("cuecut.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Output root: {}", config.settings().paths.output_root);
//!
//! // Modify a setting
//! config.settings_mut().logging.compact = false;
//!
//! // Save just the logging section atomically
//! config.update_section(ConfigSection::Logging).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, DownloadSettings, LoggingSettings, PathSettings, Settings, SplitSettings,
};
