//! Cue-sheet scanning.
//!
//! A cue sheet is free text, one entry per line, in the shape
//! `<name> <timestamp>`. Lines without a trailing timestamp are ignored so
//! the scanner tolerates headers, blank lines, and commentary.

use once_cell::sync::Lazy;
use regex::Regex;

use super::timestamp::{Timestamp, TimestampResult};

/// Timestamp detection pattern: 1-2 digits, a colon, 2 digits.
static TIMESTAMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("timestamp pattern compiles"));

/// One qualifying cue line: a name and its parsed start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueEntry {
    /// Everything before the trailing timestamp, trimmed.
    pub name: String,
    /// The entry's start time.
    pub start: Timestamp,
}

/// Scan cue lines into ordered entries.
///
/// A line qualifies only if its last whitespace-delimited token contains a
/// timestamp pattern and a non-empty name precedes it; everything else is
/// skipped without complaint. A qualifying token that then fails to parse
/// aborts the whole scan: a cue sheet is consumed as one atomic pass, and
/// the caller falls back to interactive entry.
pub fn parse_cue_lines<I, S>(lines: I) -> TimestampResult<Vec<CueEntry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = Vec::new();

    for line in lines {
        let Some((name, token)) = split_trailing_token(line.as_ref()) else {
            continue;
        };
        if name.is_empty() || !TIMESTAMP_PATTERN.is_match(token) {
            continue;
        }

        let start = Timestamp::parse(token)?;
        entries.push(CueEntry {
            name: name.to_string(),
            start,
        });
    }

    Ok(entries)
}

/// Split a line into (name, last whitespace-delimited token).
fn split_trailing_token(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_end();
    let (name, token) = trimmed.rsplit_once(|c: char| c.is_whitespace())?;
    Some((name.trim(), token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::TimestampError;

    #[test]
    fn scans_entries_in_file_order() {
        let lines = ["Allegro 0:00", "Adagio 4:15", "Finale 9:02"];
        let entries = parse_cue_lines(lines).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Allegro");
        assert_eq!(entries[0].start.to_string(), "00:00:00");
        assert_eq!(entries[2].name, "Finale");
        assert_eq!(entries[2].start.to_string(), "00:09:02");
    }

    #[test]
    fn keeps_multi_word_names() {
        let entries = parse_cue_lines(["Symphony No. 5, I. Allegro  1:02:03"]).unwrap();
        assert_eq!(entries[0].name, "Symphony No. 5, I. Allegro");
        assert_eq!(entries[0].start.to_string(), "01:02:03");
    }

    #[test]
    fn skips_lines_without_trailing_timestamp() {
        let lines = [
            "",
            "Tracklist",
            "recorded 2019, remastered",
            "0:00",              // bare timestamp, no name
            "4:15 Adagio",       // timestamp first, not trailing
            "Finale 9:02",
        ];
        let entries = parse_cue_lines(lines).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Finale");
    }

    #[test]
    fn bad_trailing_timestamp_aborts_scan() {
        let lines = ["Allegro 0:00", "Adagio 4:155"];
        let err = parse_cue_lines(lines).unwrap_err();
        assert_eq!(err, TimestampError::InvalidTimestamp("4:155".to_string()));
    }

    #[test]
    fn empty_input_yields_no_entries() {
        let entries = parse_cue_lines(Vec::<String>::new()).unwrap();
        assert!(entries.is_empty());
    }
}
