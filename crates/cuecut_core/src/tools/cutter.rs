//! Per-segment cutting via the external transcoder.
//!
//! One invocation per segment, strictly in plan order. The trait seam
//! keeps the workflow testable without a transcoder installed.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{ToolError, ToolResult};
use crate::config::SplitSettings;
use crate::segments::{Segment, Timestamp};

/// One cut: a time range of `source` written to `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutRequest {
    /// The already-materialized source file.
    pub source: PathBuf,
    /// Start of the slice.
    pub start: Timestamp,
    /// End of the slice; `None` consumes to the end of the source.
    pub end: Option<Timestamp>,
    /// Destination file.
    pub output: PathBuf,
}

impl CutRequest {
    /// Build a request for `segment` against `source`, writing to `output`.
    pub fn for_segment(segment: &Segment, source: &Path, output: PathBuf) -> Self {
        Self {
            source: source.to_path_buf(),
            start: segment.start,
            end: segment.end,
            output,
        }
    }
}

/// Cuts one time range out of a media file.
pub trait SegmentCutter {
    /// Produce `request.output` from `request.source`.
    fn cut(&self, request: &CutRequest) -> ToolResult<()>;
}

/// [`SegmentCutter`] backed by an ffmpeg subprocess.
pub struct FfmpegCutter {
    binary: String,
    copy_codec: bool,
}

impl FfmpegCutter {
    /// Create a cutter invoking `binary`.
    pub fn new(binary: impl Into<String>, copy_codec: bool) -> Self {
        Self {
            binary: binary.into(),
            copy_codec,
        }
    }

    /// Create a cutter from the split settings section.
    pub fn from_settings(settings: &SplitSettings) -> Self {
        Self::new(&settings.transcoder, settings.copy_codec)
    }

    /// Argument vector for one cut, without the binary itself.
    fn build_args(&self, request: &CutRequest) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-nostdin".to_string(),
            "-hide_banner".to_string(),
            "-y".to_string(),
            "-i".to_string(),
            request.source.to_string_lossy().to_string(),
            "-ss".to_string(),
            request.start.to_string(),
        ];

        if let Some(end) = request.end {
            args.push("-to".to_string());
            args.push(end.to_string());
        }

        if self.copy_codec {
            args.push("-acodec".to_string());
            args.push("copy".to_string());
        }

        args.push(request.output.to_string_lossy().to_string());
        args
    }
}

impl SegmentCutter for FfmpegCutter {
    fn cut(&self, request: &CutRequest) -> ToolResult<()> {
        if !request.source.exists() {
            return Err(ToolError::FileNotFound(request.source.clone()));
        }

        let args = self.build_args(request);
        tracing::debug!("Cutting {} -> {}", request.source.display(), request.output.display());

        let output = Command::new(&self.binary)
            .args(&args)
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

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(end: Option<&str>) -> CutRequest {
        CutRequest {
            source: PathBuf::from("/music/album.mp3"),
            start: Timestamp::parse("4:15").unwrap(),
            end: end.map(|e| Timestamp::parse(e).unwrap()),
            output: PathBuf::from("/music/cuts/02_Adagio.mp3"),
        }
    }

    #[test]
    fn bounded_cut_gets_both_range_flags() {
        let cutter = FfmpegCutter::new("ffmpeg", true);
        let args = cutter.build_args(&request(Some("9:02")));

        assert_eq!(
            args,
            vec![
                "-nostdin",
                "-hide_banner",
                "-y",
                "-i",
                "/music/album.mp3",
                "-ss",
                "00:04:15",
                "-to",
                "00:09:02",
                "-acodec",
                "copy",
                "/music/cuts/02_Adagio.mp3",
            ]
        );
    }

    #[test]
    fn open_ended_cut_omits_end_flag() {
        let cutter = FfmpegCutter::new("ffmpeg", true);
        let args = cutter.build_args(&request(None));

        assert!(!args.contains(&"-to".to_string()));
        assert!(args.contains(&"-ss".to_string()));
    }

    #[test]
    fn reencode_skips_codec_copy() {
        let cutter = FfmpegCutter::new("ffmpeg", false);
        let args = cutter.build_args(&request(Some("9:02")));
        assert!(!args.contains(&"-acodec".to_string()));
    }

    #[test]
    fn missing_source_is_rejected_before_launch() {
        let cutter = FfmpegCutter::new("ffmpeg", true);
        let mut req = request(Some("9:02"));
        req.source = PathBuf::from("/nonexistent/file.mp3");

        let result = cutter.cut(&req);
        assert!(matches!(result, Err(ToolError::FileNotFound(_))));
    }
}
