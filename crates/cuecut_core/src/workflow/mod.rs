//! The split workflow: acquire a source, plan segments, cut each in order.
//!
//! One invocation is one job. Phases run sequentially in a single pass -
//! there is no queue, no cancellation, and no shared state: the plan is
//! built once, handed to the cutter segment by segment in plan order, and
//! discarded.

mod errors;

pub use errors::{JobError, JobResult};

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::segments::{
    build_plan_from_cue, build_plan_interactive, parse_cue_lines, CueBuildOutcome, PlanOutcome,
    Segment, SegmentPlan, TripleSource,
};
use crate::tools::{
    probe_duration_secs, sanitize_filename, AudioDownloader, CutRequest, SegmentCutter,
};

/// Where the audio comes from.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// A video URL handed to the downloader.
    Url(String),
    /// An already-materialized local file.
    File(PathBuf),
}

impl SourceInput {
    /// Classify a raw command-line argument.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            SourceInput::Url(arg.to_string())
        } else {
            SourceInput::File(PathBuf::from(arg))
        }
    }

    /// Derive a job name from the source.
    pub fn derive_job_name(&self) -> String {
        match self {
            SourceInput::Url(url) => url
                .rsplit('/')
                .find(|part| !part.is_empty())
                .unwrap_or("download")
                .to_string(),
            SourceInput::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "unnamed".to_string()),
        }
    }
}

/// Inputs for one split run.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// The audio source.
    pub source: SourceInput,
    /// Job name; derived from the source when absent.
    pub job_name: Option<String>,
    /// Cue sheet lines, when a cue file was found.
    pub cue_lines: Option<Vec<String>>,
    /// Pre-supplied answer for the last cue segment's end.
    pub last_end: Option<String>,
}

/// Interactive entry points the workflow needs when the cue path cannot
/// produce a plan on its own.
pub trait PlanPrompts: TripleSource {
    /// Answer for the last cue segment's end time; `None` leaves it open.
    fn last_end_answer(&mut self) -> Option<String>;
}

/// What one run produced.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Name of the run.
    pub job_name: String,
    /// The materialized source that was cut.
    pub source_path: PathBuf,
    /// Output files in plan order.
    pub outputs: Vec<PathBuf>,
    /// True when planning ended with no usable segments.
    pub no_segments: bool,
}

/// One split run: acquire, plan, cut.
pub struct SplitJob<'a, C: SegmentCutter> {
    settings: &'a Settings,
    cutter: &'a C,
    logger: &'a RunLogger,
}

impl<'a, C: SegmentCutter> SplitJob<'a, C> {
    /// Create a job over the given settings, cutter, and logger.
    pub fn new(settings: &'a Settings, cutter: &'a C, logger: &'a RunLogger) -> Self {
        Self {
            settings,
            cutter,
            logger,
        }
    }

    /// Run the job to completion.
    ///
    /// `prompts` is consulted for the last-end answer on the cue path and
    /// for interactive entry when no usable cue sheet is available.
    pub fn run<P: PlanPrompts>(
        &self,
        request: &SplitRequest,
        prompts: &mut P,
    ) -> JobResult<JobReport> {
        let job_name = request
            .job_name
            .clone()
            .unwrap_or_else(|| request.source.derive_job_name());

        // Acquire
        self.logger.phase("Acquire");
        let source_path = match &request.source {
            SourceInput::Url(url) => {
                self.logger.info(&format!("Downloading audio from {}", url));
                let downloader = AudioDownloader::from_settings(&self.settings.download);
                let path = downloader
                    .download(url, Path::new(&self.settings.paths.temp_root))
                    .map_err(|e| JobError::phase_failed(&job_name, "Acquire", e))?;
                self.logger.info(&format!("Downloaded to {}", path.display()));
                path
            }
            SourceInput::File(path) => {
                if !path.exists() {
                    return Err(JobError::setup_failed(
                        &job_name,
                        format!("source file not found: {}", path.display()),
                    ));
                }
                path.clone()
            }
        };

        match probe_duration_secs(&source_path) {
            Ok(Some(secs)) => self.logger.info(&format!("Source duration: {:.1}s", secs)),
            Ok(None) => {}
            // Probing only feeds the log; a failed probe never fails the job.
            Err(err) => self.logger.warn(&format!("Duration probe failed: {}", err)),
        }

        // Plan
        self.logger.phase("Plan");
        let Some(plan) = self.build_plan(request, prompts) else {
            self.logger.warn("No segments planned; nothing to cut");
            return Ok(JobReport {
                job_name,
                source_path,
                outputs: Vec::new(),
                no_segments: true,
            });
        };

        self.logger.info(&format!("Planned {} segment(s)", plan.len()));
        for segment in plan.iter() {
            let end = segment
                .end
                .map(|e| e.to_string())
                .unwrap_or_else(|| "end of source".to_string());
            self.logger.info(&format!(
                "  {}. {} [{} - {}]",
                segment.index, segment.name, segment.start, end
            ));
        }

        // Cut
        self.logger.phase("Cut");
        let out_dir =
            Path::new(&self.settings.paths.output_root).join(sanitize_filename(&job_name));
        fs::create_dir_all(&out_dir).map_err(|e| {
            JobError::setup_failed(
                &job_name,
                format!("could not create {}: {}", out_dir.display(), e),
            )
        })?;

        let total = plan.len() as u32;
        let mut outputs = Vec::with_capacity(plan.len());

        for segment in plan.iter() {
            let output = out_dir.join(self.output_file_name(segment));
            self.logger.info(&format!(
                "Cutting segment {}/{}: {}",
                segment.index, total, segment.name
            ));

            let cut = CutRequest::for_segment(segment, &source_path, output.clone());
            self.cutter.cut(&cut).map_err(|e| {
                self.logger.show_tail("cut");
                JobError::cut_failed(&job_name, segment.index, &segment.name, e)
            })?;

            outputs.push(output);
            self.logger.progress(segment.index * 100 / total);
        }

        self.logger.success(&format!(
            "Wrote {} file(s) to {}",
            outputs.len(),
            out_dir.display()
        ));

        Ok(JobReport {
            job_name,
            source_path,
            outputs,
            no_segments: false,
        })
    }

    /// Obtain a plan: cue path first, interactive entry as the fallback.
    ///
    /// A rejected cue sheet (bad timestamp) or one with no entries drops to
    /// interactive entry; `None` means both paths came up empty.
    fn build_plan<P: PlanPrompts>(
        &self,
        request: &SplitRequest,
        prompts: &mut P,
    ) -> Option<SegmentPlan> {
        if let Some(lines) = &request.cue_lines {
            match parse_cue_lines(lines) {
                Ok(entries) => {
                    let answer = match &request.last_end {
                        Some(answer) => Some(answer.clone()),
                        None if entries.is_empty() => None,
                        None => prompts.last_end_answer(),
                    };

                    match build_plan_from_cue(entries, answer.as_deref()) {
                        CueBuildOutcome::Plan {
                            plan,
                            rejected_last_end,
                        } => {
                            if let Some(rejected) = rejected_last_end {
                                self.logger.warn(&format!(
                                    "Last segment end '{}' not understood; leaving it open-ended",
                                    rejected
                                ));
                            }
                            return Some(plan);
                        }
                        CueBuildOutcome::NoSegments => {
                            self.logger
                                .info("Cue sheet had no entries; switching to interactive entry");
                        }
                    }
                }
                Err(err) => {
                    self.logger.warn(&format!(
                        "Cue sheet rejected ({}); switching to interactive entry",
                        err
                    ));
                }
            }
        }

        match build_plan_interactive(prompts) {
            PlanOutcome::Plan(plan) => Some(plan),
            PlanOutcome::NoSegments => None,
        }
    }

    /// Output filename for a segment: `<NN>_<name>.<ext>`.
    fn output_file_name(&self, segment: &Segment) -> String {
        format!(
            "{:0width$}_{}.{}",
            segment.index,
            sanitize_filename(&segment.name),
            self.settings.split.extension,
            width = self.settings.split.track_number_width as usize
        )
    }
}
