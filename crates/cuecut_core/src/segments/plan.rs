//! Segment plan types and the cue-path builder.
//!
//! A plan is built once per source, consumed in order by the cutter, and
//! discarded; nothing here persists.

use serde::{Deserialize, Serialize};

use super::cue::{parse_cue_lines, CueEntry};
use super::timestamp::{Timestamp, TimestampResult};

/// One planned output slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position in the output sequence; drives default naming and
    /// file ordering.
    pub index: u32,
    /// Human-readable label; `Part_<index>` when none was supplied.
    pub name: String,
    /// Start of the slice.
    pub start: Timestamp,
    /// End of the slice; `None` means "continue to the end of the source".
    pub end: Option<Timestamp>,
}

impl Segment {
    /// Default label for the segment at `index`.
    pub fn default_name(index: u32) -> String {
        format!("Part_{}", index)
    }

    /// Whether the segment runs to the end of the source.
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }
}

/// The ordered sequence of segments for one source file.
///
/// Non-empty by construction: builders return a no-segments outcome instead
/// of an empty plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
}

impl SegmentPlan {
    pub(super) fn from_segments(segments: Vec<Segment>) -> Self {
        debug_assert!(!segments.is_empty());
        debug_assert!(segments
            .iter()
            .enumerate()
            .all(|(i, s)| s.index == i as u32 + 1));
        Self { segments }
    }

    /// Number of segments in the plan.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in plan order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate segments in plan order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// The final segment.
    pub fn last(&self) -> &Segment {
        // Construction guarantees at least one segment.
        &self.segments[self.segments.len() - 1]
    }
}

/// Outcome of building a plan from a cue sheet.
#[derive(Debug, Clone)]
pub enum CueBuildOutcome {
    /// A non-empty plan was built.
    Plan {
        plan: SegmentPlan,
        /// The literal last-end answer, when it was supplied but failed to
        /// parse and the final segment was left open-ended instead.
        rejected_last_end: Option<String>,
    },
    /// The cue input contained no usable entries.
    NoSegments,
}

/// Outcome of the interactive path.
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    /// A non-empty plan was built.
    Plan(SegmentPlan),
    /// The session ended before any entry was accepted.
    NoSegments,
}

/// Build a plan from already-parsed cue entries.
///
/// Every entry except the last gets its end from the next entry's start,
/// so cue-derived segments are contiguous by construction. The last entry
/// takes `last_end` when it parses; a failed answer is reported in the
/// outcome and the segment is left open-ended rather than aborting.
pub fn build_plan_from_cue(entries: Vec<CueEntry>, last_end: Option<&str>) -> CueBuildOutcome {
    if entries.is_empty() {
        return CueBuildOutcome::NoSegments;
    }

    let count = entries.len();
    let mut rejected_last_end = None;
    let mut segments = Vec::with_capacity(count);

    for (i, entry) in entries.iter().enumerate() {
        let end = if i + 1 < count {
            Some(entries[i + 1].start)
        } else {
            match last_end.map(str::trim).filter(|s| !s.is_empty()) {
                Some(answer) => match Timestamp::parse(answer) {
                    Ok(ts) => Some(ts),
                    Err(err) => {
                        tracing::warn!(
                            "last segment end '{}' did not parse; leaving it open-ended",
                            err.original()
                        );
                        rejected_last_end = Some(err.original().to_string());
                        None
                    }
                },
                None => None,
            }
        };

        let segment = Segment {
            index: i as u32 + 1,
            name: entry.name.clone(),
            start: entry.start,
            end,
        };
        warn_if_inverted(&segment);
        segments.push(segment);
    }

    CueBuildOutcome::Plan {
        plan: SegmentPlan::from_segments(segments),
        rejected_last_end,
    }
}

/// Build a plan straight from cue-sheet lines.
///
/// This is the cue-path entry point: it scans the lines (an unparsable
/// trailing timestamp aborts the scan with `InvalidTimestamp`) and then
/// applies the end-time inference above.
pub fn build_plan_from_cue_lines<I, S>(
    lines: I,
    last_end: Option<&str>,
) -> TimestampResult<CueBuildOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries = parse_cue_lines(lines)?;
    Ok(build_plan_from_cue(entries, last_end))
}

/// Accepted segments with a non-increasing range are preserved (the cutter
/// decides what to do with them) but worth flagging.
fn warn_if_inverted(segment: &Segment) {
    if let Some(end) = segment.end {
        if end.total_secs() <= segment.start.total_secs() {
            tracing::warn!(
                "segment {} '{}' has end {} not after start {}",
                segment.index,
                segment.name,
                end,
                segment.start
            );
        }
    }
}
