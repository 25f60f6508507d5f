//! Timestamp parsing and canonical formatting.
//!
//! Cue sheets and interactive prompts supply timestamps in several
//! shorthand forms; everything downstream works with the canonical
//! `hh:mm:ss` shape.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error for timestamp strings that match no accepted shape.
///
/// Carries the original string so callers can echo it back when
/// re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The string matched none of the accepted timestamp shapes.
    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),
}

impl TimestampError {
    /// The original input string that was rejected.
    pub fn original(&self) -> &str {
        match self {
            TimestampError::InvalidTimestamp(original) => original,
        }
    }
}

/// Type alias for timestamp operation results.
pub type TimestampResult<T> = Result<T, TimestampError>;

/// A position in the source media, stored as parsed `hh:mm:ss` components.
///
/// Components are kept exactly as parsed: `90:00` stays `00:90:00` rather
/// than being carried into `01:30:00`. Minutes and seconds are not
/// range-checked; `total_secs` resolves the actual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl Timestamp {
    /// Parse a free-form timestamp string.
    ///
    /// Accepted shapes, each field 1-2 digits:
    /// - `hh:mm:ss` (or `h:m:s`, zero-padded on output)
    /// - `mm:ss`, read as `00:mm:ss`
    ///
    /// Anything else fails with [`TimestampError::InvalidTimestamp`].
    pub fn parse(input: &str) -> TimestampResult<Self> {
        let invalid = || TimestampError::InvalidTimestamp(input.to_string());

        let fields: Vec<&str> = input.trim().split(':').collect();
        let (h, m, s) = match fields.as_slice() {
            [m, s] => ("0", *m, *s),
            [h, m, s] => (*h, *m, *s),
            _ => return Err(invalid()),
        };

        Ok(Self {
            hours: parse_field(h).ok_or_else(invalid)?,
            minutes: parse_field(m).ok_or_else(invalid)?,
            seconds: parse_field(s).ok_or_else(invalid)?,
        })
    }

    /// Resolved position as a count of seconds since the start of the
    /// source.
    pub fn total_secs(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

/// A field is valid only as 1-2 ASCII digits.
fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

// Ordering goes through the resolved value: the derived component order
// would sort `00:90:00` before `01:00:00`.
impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_secs().cmp(&other.total_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_shape() {
        let ts = Timestamp::parse("1:02:03").unwrap();
        assert_eq!(ts.to_string(), "01:02:03");
        assert_eq!(ts.total_secs(), 3723);
    }

    #[test]
    fn short_shape_gets_zero_hours() {
        let ts = Timestamp::parse("4:15").unwrap();
        assert_eq!(ts.to_string(), "00:04:15");
        assert_eq!(ts.total_secs(), 255);
    }

    #[test]
    fn single_digit_fields_are_padded() {
        assert_eq!(
            Timestamp::parse("5:3").unwrap(),
            Timestamp::parse("05:03").unwrap()
        );
        assert_eq!(Timestamp::parse("5:3").unwrap().to_string(), "00:05:03");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["0:00", "4:15", "1:02:03", "90:00", "12:30"] {
            let once = Timestamp::parse(input).unwrap();
            let twice = Timestamp::parse(&once.to_string()).unwrap();
            assert_eq!(once, twice, "input {:?}", input);
            assert_eq!(once.to_string(), twice.to_string());
        }
    }

    // Oversized minutes are accepted as-is; the parser performs no range
    // check on components.
    #[test]
    fn oversized_components_pass_through() {
        let ts = Timestamp::parse("90:00").unwrap();
        assert_eq!(ts.to_string(), "00:90:00");
        assert_eq!(ts.total_secs(), 5400);
    }

    #[test]
    fn rejects_wrong_shapes() {
        for input in ["", "12", "1:2:3:4", "123:00", "4:155", "ab:cd", "4: 15", "-1:00"] {
            let err = Timestamp::parse(input).unwrap_err();
            assert_eq!(err, TimestampError::InvalidTimestamp(input.to_string()));
            assert_eq!(err.original(), input);
        }
    }

    #[test]
    fn ordering_uses_resolved_value() {
        let oversized = Timestamp::parse("90:00").unwrap();
        let plain = Timestamp::parse("1:00:00").unwrap();
        assert!(oversized > plain);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            Timestamp::parse("  4:15\n").unwrap(),
            Timestamp::parse("4:15").unwrap()
        );
    }
}
