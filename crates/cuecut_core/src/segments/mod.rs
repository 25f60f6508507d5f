//! Segment planning.
//!
//! Turns a loosely structured cue sheet, or interactively supplied
//! (start, end, name) triples, into a validated, ordered plan of named
//! time ranges ready for per-segment cutting.
//!
//! # Usage
//!
//! ```
//! use cuecut_core::segments::{build_plan_from_cue_lines, CueBuildOutcome};
//!
//! let lines = ["Allegro 0:00", "Adagio 4:15", "Finale 9:02"];
//! let outcome = build_plan_from_cue_lines(lines, Some("12:30")).unwrap();
//!
//! let CueBuildOutcome::Plan { plan, .. } = outcome else {
//!     panic!("cue sheet had entries");
//! };
//! assert_eq!(plan.len(), 3);
//! ```

mod cue;
mod interactive;
mod plan;
mod timestamp;

// Re-export types
pub use plan::{CueBuildOutcome, PlanOutcome, Segment, SegmentPlan};
pub use timestamp::{Timestamp, TimestampError, TimestampResult};

// Re-export functions
pub use cue::{parse_cue_lines, CueEntry};
pub use interactive::{build_plan_interactive, EntryTriple, TripleSource};
pub use plan::{build_plan_from_cue, build_plan_from_cue_lines};
