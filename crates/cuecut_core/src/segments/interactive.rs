//! Interactive segment entry.
//!
//! Entries are pulled from a [`TripleSource`] one (start, end, name) triple
//! at a time, validated, and accumulated in entry order. The loop is an
//! explicit state machine so termination and re-prompt behavior are
//! testable without a terminal attached.

use super::plan::{PlanOutcome, Segment, SegmentPlan};
use super::timestamp::{Timestamp, TimestampError};

/// Raw values for one prompted segment.
#[derive(Debug, Clone, Default)]
pub struct EntryTriple {
    /// Start time; blank ends the session.
    pub start: String,
    /// End time; required, open-ended segments are not representable here.
    pub end: String,
    /// Label; blank falls back to `Part_<index>`.
    pub name: String,
}

impl EntryTriple {
    /// Convenience constructor for callers assembling triples by hand.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            name: name.into(),
        }
    }
}

/// Pull-based supplier of interactive entries.
pub trait TripleSource {
    /// Supply the next triple for the segment at `index` (1-based).
    ///
    /// Returning `None`, or a triple with a blank start, ends the session.
    fn next_triple(&mut self, index: u32) -> Option<EntryTriple>;

    /// Called when a triple was rejected; the same `index` is pulled again.
    ///
    /// The error carries the literal offending string for display.
    fn entry_rejected(&mut self, _index: u32, _error: &TimestampError) {}
}

/// States of the entry loop; transitions follow the prompt order.
enum EntryState {
    AwaitingStart,
    AwaitingEnd { start: Timestamp },
    AwaitingName { start: Timestamp, end: Timestamp },
}

/// What became of one pulled triple.
enum TripleOutcome {
    Accepted(Segment),
    Rejected(TimestampError),
    EndOfInput,
}

/// Build a plan by pulling triples until a blank start.
///
/// A rejected triple never disturbs already-accepted segments; the source
/// is simply asked again for the same index.
pub fn build_plan_interactive<S: TripleSource + ?Sized>(source: &mut S) -> PlanOutcome {
    let mut segments: Vec<Segment> = Vec::new();

    loop {
        let index = segments.len() as u32 + 1;
        let Some(triple) = source.next_triple(index) else {
            break;
        };

        match evaluate_triple(&triple, index) {
            TripleOutcome::EndOfInput => break,
            TripleOutcome::Rejected(error) => source.entry_rejected(index, &error),
            TripleOutcome::Accepted(segment) => segments.push(segment),
        }
    }

    if segments.is_empty() {
        PlanOutcome::NoSegments
    } else {
        PlanOutcome::Plan(SegmentPlan::from_segments(segments))
    }
}

/// Walk one triple through the entry states.
fn evaluate_triple(triple: &EntryTriple, index: u32) -> TripleOutcome {
    let mut state = EntryState::AwaitingStart;

    loop {
        state = match state {
            EntryState::AwaitingStart => {
                let raw = triple.start.trim();
                if raw.is_empty() {
                    return TripleOutcome::EndOfInput;
                }
                match Timestamp::parse(raw) {
                    Ok(start) => EntryState::AwaitingEnd { start },
                    Err(error) => return TripleOutcome::Rejected(error),
                }
            }
            EntryState::AwaitingEnd { start } => match Timestamp::parse(triple.end.trim()) {
                Ok(end) => EntryState::AwaitingName { start, end },
                Err(error) => return TripleOutcome::Rejected(error),
            },
            EntryState::AwaitingName { start, end } => {
                let trimmed = triple.name.trim();
                let name = if trimmed.is_empty() {
                    Segment::default_name(index)
                } else {
                    trimmed.to_string()
                };
                return TripleOutcome::Accepted(Segment {
                    index,
                    name,
                    start,
                    end: Some(end),
                });
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted source that replays a fixed list of triples and records
    /// rejections.
    struct Scripted {
        triples: Vec<EntryTriple>,
        pulled: Vec<u32>,
        rejected: Vec<(u32, String)>,
    }

    impl Scripted {
        fn new(triples: Vec<EntryTriple>) -> Self {
            Self {
                triples,
                pulled: Vec::new(),
                rejected: Vec::new(),
            }
        }
    }

    impl TripleSource for Scripted {
        fn next_triple(&mut self, index: u32) -> Option<EntryTriple> {
            self.pulled.push(index);
            if self.triples.is_empty() {
                None
            } else {
                Some(self.triples.remove(0))
            }
        }

        fn entry_rejected(&mut self, index: u32, error: &TimestampError) {
            self.rejected.push((index, error.original().to_string()));
        }
    }

    #[test]
    fn bad_end_reprompts_same_index() {
        let mut source = Scripted::new(vec![
            EntryTriple::new("1:00", "bad", ""),
            EntryTriple::new("1:00", "2:00", ""),
            EntryTriple::new("", "", ""),
        ]);

        let outcome = build_plan_interactive(&mut source);

        let PlanOutcome::Plan(plan) = outcome else {
            panic!("expected a plan");
        };
        assert_eq!(plan.len(), 1);

        let segment = &plan.segments()[0];
        assert_eq!(segment.index, 1);
        assert_eq!(segment.name, "Part_1");
        assert_eq!(segment.start.to_string(), "00:01:00");
        assert_eq!(segment.end.unwrap().to_string(), "00:02:00");

        // Index 1 was pulled twice (rejection), then index 2 terminated.
        assert_eq!(source.pulled, vec![1, 1, 2]);
        assert_eq!(source.rejected, vec![(1, "bad".to_string())]);
    }

    #[test]
    fn bad_start_reprompts_same_index() {
        let mut source = Scripted::new(vec![
            EntryTriple::new("later", "2:00", ""),
            EntryTriple::new("1:00", "2:00", "Intro"),
            EntryTriple::new("", "", ""),
        ]);

        let outcome = build_plan_interactive(&mut source);

        let PlanOutcome::Plan(plan) = outcome else {
            panic!("expected a plan");
        };
        assert_eq!(plan.segments()[0].name, "Intro");
        assert_eq!(source.rejected, vec![(1, "later".to_string())]);
    }

    #[test]
    fn blank_start_terminates_immediately() {
        let mut source = Scripted::new(vec![EntryTriple::new("  ", "9:99", "ignored")]);
        let outcome = build_plan_interactive(&mut source);
        assert!(matches!(outcome, PlanOutcome::NoSegments));
    }

    #[test]
    fn exhausted_source_terminates() {
        let mut source = Scripted::new(Vec::new());
        let outcome = build_plan_interactive(&mut source);
        assert!(matches!(outcome, PlanOutcome::NoSegments));
    }

    #[test]
    fn accepted_entries_keep_entry_order() {
        let mut source = Scripted::new(vec![
            EntryTriple::new("0:00", "1:30", "One"),
            EntryTriple::new("1:30", "3:00", ""),
            EntryTriple::new("3:00", "4:00", "Three"),
            EntryTriple::new("", "", ""),
        ]);

        let outcome = build_plan_interactive(&mut source);

        let PlanOutcome::Plan(plan) = outcome else {
            panic!("expected a plan");
        };
        let names: Vec<&str> = plan.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Part_2", "Three"]);

        let indexes: Vec<u32> = plan.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);

        // Interactive segments always carry an explicit end.
        assert!(plan.iter().all(|s| !s.is_open_ended()));
    }
}
