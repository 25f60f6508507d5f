//! Error types for the split workflow.
//!
//! Errors carry context that chains through layers:
//! Job → Phase → Tool → Detail

use thiserror::Error;

use crate::tools::ToolError;

/// Top-level job error with run context.
#[derive(Error, Debug)]
pub enum JobError {
    /// A phase failed during execution.
    #[error("Job '{job_name}' failed in phase '{phase}': {source}")]
    PhaseFailed {
        job_name: String,
        phase: String,
        #[source]
        source: ToolError,
    },

    /// Cutting a specific segment failed.
    #[error("Job '{job_name}' failed cutting segment {index} '{segment}': {source}")]
    CutFailed {
        job_name: String,
        index: u32,
        segment: String,
        #[source]
        source: ToolError,
    },

    /// Failed to set up the job (create directories, missing inputs).
    #[error("Job '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl JobError {
    /// Create a phase failed error.
    pub fn phase_failed(
        job_name: impl Into<String>,
        phase: impl Into<String>,
        source: ToolError,
    ) -> Self {
        Self::PhaseFailed {
            job_name: job_name.into(),
            phase: phase.into(),
            source,
        }
    }

    /// Create a cut failed error.
    pub fn cut_failed(
        job_name: impl Into<String>,
        index: u32,
        segment: impl Into<String>,
        source: ToolError,
    ) -> Self {
        Self::CutFailed {
            job_name: job_name.into(),
            index,
            segment: segment.into(),
            source,
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }
}

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;
