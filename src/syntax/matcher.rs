//! Token matching
//!
//! Runs a pattern over a slice of text and normalizes the results into
//! [`Match`] records. Offsets are byte offsets relative to the slice that was
//! searched; callers add their own base offset to get document positions.
//!
//! Match and group ends are *inclusive* (the offset of the last byte of the
//! match). Zero-length matches carry no text to format and are dropped, so
//! every returned match satisfies `start <= end`.

use regex::{Captures, Regex};

/// A captured sub-group of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Offset of the first byte
    pub start: usize,
    /// Offset of the last byte (inclusive)
    pub end: usize,
    /// Captured text
    pub text: String,
}

impl Group {
    /// Offset one past the last byte
    pub fn end_exclusive(&self) -> usize {
        self.end + 1
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Groups always hold at least one byte
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A single pattern match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Offset of the first byte
    pub start: usize,
    /// Offset of the last byte (inclusive)
    pub end: usize,
    /// Matched text
    pub text: String,
    /// Capture groups 1..n; `None` for groups that did not participate or
    /// captured nothing
    pub groups: Vec<Option<Group>>,
}

impl Match {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        if whole.is_empty() {
            return None;
        }

        let groups = caps
            .iter()
            .skip(1)
            .map(|group| {
                group.filter(|g| !g.is_empty()).map(|g| Group {
                    start: g.start(),
                    end: g.end() - 1,
                    text: g.as_str().to_string(),
                })
            })
            .collect();

        Some(Self {
            start: whole.start(),
            end: whole.end() - 1,
            text: whole.as_str().to_string(),
            groups,
        })
    }

    /// Offset one past the last byte
    pub fn end_exclusive(&self) -> usize {
        self.end + 1
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Matches always hold at least one byte
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get capture group `index` (1-based, like regex group numbers)
    pub fn group(&self, index: usize) -> Option<&Group> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .and_then(|g| g.as_ref())
    }

    /// Check whether this match overlaps the half-open range `start..end`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end_exclusive()
    }
}

/// Find all non-overlapping matches of `pattern` in `text`
///
/// Matches come back in ascending start order. The regex iterator advances
/// past empty matches by at least one character, and empty matches are
/// discarded, so a pattern that can match the empty string terminates and
/// yields only its non-empty matches.
pub fn find_matches(text: &str, pattern: &Regex) -> Vec<Match> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| Match::from_captures(&caps))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_in_order() {
        let re = Regex::new(r"\*\*[^*]+\*\*").unwrap();
        let matches = find_matches("a **b** c **d**", &re);
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end), (2, 6));
        assert_eq!(matches[0].text, "**b**");
        assert_eq!((matches[1].start, matches[1].end), (10, 14));
        assert_eq!(matches[1].end_exclusive(), 15);
    }

    #[test]
    fn test_group_offsets_relative_to_text() {
        let re = Regex::new(r"(\[)([^\]]*)(\]\()([^)]*)(\))").unwrap();
        let matches = find_matches("see [name](link) here", &re);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.start, 4);
        assert_eq!(m.text, "[name](link)");
        let name = m.group(2).unwrap();
        assert_eq!((name.start, name.end), (5, 8));
        assert_eq!(name.text, "name");
        let link = m.group(4).unwrap();
        assert_eq!(link.text, "link");
        assert_eq!(link.start, 11);
        assert!(m.group(0).is_none());
        assert!(m.group(6).is_none());
    }

    #[test]
    fn test_groups_within_match() {
        let re = Regex::new(r"(?m)^([ \t]*)(TODO|FIXME)(:)").unwrap();
        for m in find_matches("TODO: a\n  FIXME: b", &re) {
            for group in m.groups.iter().flatten() {
                assert!(group.start >= m.start && group.end <= m.end);
            }
        }
    }

    #[test]
    fn test_empty_matches_terminate() {
        let re = Regex::new(r"a*").unwrap();
        let matches = find_matches("baab", &re);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "aa");
        assert_eq!((matches[0].start, matches[0].end), (1, 2));
    }

    #[test]
    fn test_empty_pattern_yields_nothing() {
        let re = Regex::new(r"").unwrap();
        assert!(find_matches("héllo", &re).is_empty());
    }

    #[test]
    fn test_unparticipating_group_is_none() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        let matches = find_matches("b", &re);
        assert!(matches[0].group(1).is_none());
        assert_eq!(matches[0].group(2).unwrap().text, "b");
    }

    #[test]
    fn test_multibyte_inclusive_end() {
        let re = Regex::new(r"`[^`]+`").unwrap();
        let text = "x `é` y";
        let m = &find_matches(text, &re)[0];
        assert_eq!(&text[m.start..m.end_exclusive()], "`é`");
    }

    #[test]
    fn test_overlaps() {
        let re = Regex::new(r"abc").unwrap();
        let m = &find_matches("xxabcxx", &re)[0];
        assert!(m.overlaps(0, 3));
        assert!(m.overlaps(4, 10));
        assert!(!m.overlaps(0, 2));
        assert!(!m.overlaps(5, 7));
    }
}
