//! External tool invocation.
//!
//! The downloader, cutter, and prober are thin subprocess wrappers around
//! general-purpose media tools. Nothing here owns a format or protocol:
//! each call hands a file path or time range to the tool and maps the exit
//! status back into a typed error.

mod cutter;
mod downloader;
mod probe;

pub use cutter::{CutRequest, FfmpegCutter, SegmentCutter};
pub use downloader::AudioDownloader;
pub use probe::probe_duration_secs;

use std::path::PathBuf;

/// Error type for external tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The tool binary could not be started at all.
    #[error("Failed to launch {tool}: {message}")]
    LaunchFailed { tool: String, message: String },

    /// The tool ran and reported failure.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// A required input file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The tool ran but its output made no sense.
    #[error("Failed to parse {tool} output: {message}")]
    MalformedOutput { tool: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error from tool output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for tool operation results.
pub type ToolResult<T> = Result<T, ToolError>;

/// Sanitize a string to be safe for use as a filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_filename() {
        assert_eq!(sanitize_filename("normal_name"), "normal_name");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("has:colon"), "has_colon");
        assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
    }

    #[test]
    fn command_failed_displays_context() {
        let err = ToolError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: 1,
            message: "Invalid argument".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Invalid argument"));
    }
}
