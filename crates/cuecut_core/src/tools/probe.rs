//! Source duration probing using ffprobe.
//!
//! Used for run logging only; a probe failure never fails a job.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::{ToolError, ToolResult};

/// Get the duration of a media file in seconds.
///
/// Returns `None` when the container reports no duration.
pub fn probe_duration_secs(path: &Path) -> ToolResult<Option<f64>> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", path.display());

    let output = Command::new("ffprobe")
        .args(["-v", "error", "-show_format", "-of", "json"])
        .arg(path)
        .output()
        .map_err(|e| ToolError::LaunchFailed {
            tool: "ffprobe".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolError::CommandFailed {
            tool: "ffprobe".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: stderr.trim().to_string(),
        });
    }

    let json: Value = serde_json::from_slice(&output.stdout)?;

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|s| s.parse::<f64>().ok());

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_nonexistent_file() {
        let result = probe_duration_secs(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(ToolError::FileNotFound(_))));
    }
}
