use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A contiguous block of pages, 1-indexed and inclusive on both ends.
///
/// Well-formed only when `1 <= start <= end <= total_pages`; construction
/// does not enforce this, [`validate_bounds`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        PageRange { start, end }
    }

    /// The page numbers this range denotes. Empty when the range is inverted.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    fn is_within(&self, total_pages: u32) -> bool {
        self.start >= 1 && self.start <= self.end && self.end <= total_pages
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    /// A line of range text that is not `<start>-<end>`.
    #[error("line {line}: malformed page range '{text}', expected <start>-<end>")]
    Malformed { line: usize, text: String },

    /// An inverted range, or one that reaches outside the document.
    #[error("page range {range} is invalid for a document with {total} page(s)")]
    Invalid { range: PageRange, total: u32 },

    /// Even-split part size of zero.
    #[error("pages per part must be at least 1")]
    EmptyChunk,
}

fn malformed(line: usize, text: &str) -> RangeError {
    RangeError::Malformed {
        line,
        text: text.to_string(),
    }
}

/// Parse one page range per line, in the form `<start>-<end>`.
///
/// Blank lines are skipped; whitespace around a line or around either number
/// is tolerated. Anything else fails, naming the 1-based offending line.
/// Output order is line order, which is also split-output order.
pub fn parse_ranges(text: &str) -> Result<Vec<PageRange>, RangeError> {
    let mut ranges = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (start, end) = line.split_once('-').ok_or_else(|| malformed(idx + 1, line))?;
        if end.contains('-') {
            return Err(malformed(idx + 1, line));
        }
        let start = start
            .trim()
            .parse::<u32>()
            .map_err(|_| malformed(idx + 1, line))?;
        let end = end
            .trim()
            .parse::<u32>()
            .map_err(|_| malformed(idx + 1, line))?;
        ranges.push(PageRange::new(start, end));
    }
    Ok(ranges)
}

/// Pages covered by more than one range, in first-detection order.
///
/// Ranges that fail the well-formedness invariant are skipped here; they are
/// rejected separately by [`validate_bounds`] when a split materializes them.
/// A page is reported once no matter how often it re-occurs.
pub fn check_duplicates(ranges: &[PageRange], total_pages: u32) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();
    for range in ranges {
        if !range.is_within(total_pages) {
            continue;
        }
        for page in range.pages() {
            if !seen.insert(page) && !duplicates.contains(&page) {
                duplicates.push(page);
            }
        }
    }
    duplicates
}

/// Pages of `1..=total_pages` covered by no range, in ascending order.
///
/// Ranges are not filtered for validity: an out-of-bounds range still covers
/// the pages it literally denotes, an inverted one covers nothing.
pub fn check_missing(ranges: &[PageRange], total_pages: u32) -> Vec<u32> {
    let mut covered = BTreeSet::new();
    for range in ranges {
        // Pages beyond the document cannot be missing, so cap the walk there.
        covered.extend(range.start..=range.end.min(total_pages));
    }
    (1..=total_pages).filter(|p| !covered.contains(p)).collect()
}

/// The strict per-range gate, applied immediately before a range is
/// materialized into an output document.
pub fn validate_bounds(range: PageRange, total_pages: u32) -> Result<(), RangeError> {
    if range.is_within(total_pages) {
        Ok(())
    } else {
        Err(RangeError::Invalid {
            range,
            total: total_pages,
        })
    }
}

/// Outcome of [`even_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvenSplit {
    /// The document fits in one part; there is nothing to split.
    Single,
    /// Contiguous, disjoint parts covering every page exactly once.
    Parts(Vec<PageRange>),
}

/// Partition `1..=total_pages` into parts of `pages_per_part` pages, the last
/// part absorbing the remainder.
pub fn even_split(total_pages: u32, pages_per_part: u32) -> Result<EvenSplit, RangeError> {
    if pages_per_part == 0 {
        return Err(RangeError::EmptyChunk);
    }

    let parts = total_pages.div_ceil(pages_per_part);
    if parts <= 1 {
        return Ok(EvenSplit::Single);
    }

    let ranges = (0..parts)
        .map(|i| PageRange {
            start: i * pages_per_part + 1,
            end: ((i + 1) * pages_per_part).min(total_pages),
        })
        .collect();
    Ok(EvenSplit::Parts(ranges))
}

/// Advisory coverage findings for a set of requested ranges, plus the ranges
/// that the strict gate would reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub duplicate_pages: Vec<u32>,
    pub missing_pages: Vec<u32>,
    pub invalid_ranges: Vec<PageRange>,
}

impl Coverage {
    pub fn of(ranges: &[PageRange], total_pages: u32) -> Self {
        Coverage {
            duplicate_pages: check_duplicates(ranges, total_pages),
            missing_pages: check_missing(ranges, total_pages),
            invalid_ranges: ranges
                .iter()
                .copied()
                .filter(|r| !r.is_within(total_pages))
                .collect(),
        }
    }

    /// True when there is nothing to warn about.
    pub fn is_clean(&self) -> bool {
        self.duplicate_pages.is_empty() && self.missing_pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> PageRange {
        PageRange::new(start, end)
    }

    #[test]
    fn test_parse_two_lines() {
        let ranges = parse_ranges("1-3\n5-7").unwrap();
        assert_eq!(ranges, vec![range(1, 3), range(5, 7)]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let ranges = parse_ranges("\n  1 - 3 \n\n4-4\n").unwrap();
        assert_eq!(ranges, vec![range(1, 3), range(4, 4)]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_ranges("abc").unwrap_err();
        assert_eq!(
            err,
            RangeError::Malformed {
                line: 1,
                text: "abc".into()
            }
        );
    }

    #[test]
    fn test_parse_names_offending_line() {
        let err = parse_ranges("1-3\n\nx-y").unwrap_err();
        assert_eq!(
            err,
            RangeError::Malformed {
                line: 3,
                text: "x-y".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_extra_dash() {
        assert!(parse_ranges("1-2-3").is_err());
        assert!(parse_ranges("-5").is_err());
        assert!(parse_ranges("5").is_err());
    }

    #[test]
    fn test_parse_preserves_line_order() {
        let ranges = parse_ranges("5-7\n1-3").unwrap();
        assert_eq!(ranges, vec![range(5, 7), range(1, 3)]);
    }

    #[test]
    fn test_duplicates_overlapping_ranges() {
        let dups = check_duplicates(&[range(1, 3), range(2, 4)], 10);
        assert_eq!(dups, vec![2, 3]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        // Page 2 occurs in three ranges but is reported a single time.
        let dups = check_duplicates(&[range(1, 3), range(2, 4), range(2, 2)], 10);
        assert_eq!(dups, vec![2, 3]);
    }

    #[test]
    fn test_duplicates_skip_invalid_ranges() {
        // The out-of-bounds and inverted ranges do not participate.
        let dups = check_duplicates(&[range(1, 3), range(1, 20), range(3, 1)], 10);
        assert!(dups.is_empty());
    }

    #[test]
    fn test_duplicates_detection_order() {
        let dups = check_duplicates(&[range(4, 6), range(1, 5)], 10);
        assert_eq!(dups, vec![4, 5]);
    }

    #[test]
    fn test_missing_gap() {
        assert_eq!(check_missing(&[range(1, 3), range(5, 7)], 7), vec![4]);
    }

    #[test]
    fn test_missing_counts_out_of_bounds_coverage() {
        // 5-20 is invalid for writing, but it still covers 5..=7 here.
        assert_eq!(check_missing(&[range(5, 20)], 7), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_inverted_range_covers_nothing() {
        assert_eq!(check_missing(&[range(3, 1)], 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_ascending_order() {
        assert_eq!(check_missing(&[range(4, 4), range(2, 2)], 5), vec![1, 3, 5]);
    }

    #[test]
    fn test_bounds_rejects_zero_start() {
        assert!(validate_bounds(range(0, 5), 10).is_err());
    }

    #[test]
    fn test_bounds_rejects_inverted() {
        assert!(validate_bounds(range(3, 2), 10).is_err());
    }

    #[test]
    fn test_bounds_rejects_past_end() {
        let err = validate_bounds(range(1, 11), 10).unwrap_err();
        assert_eq!(
            err,
            RangeError::Invalid {
                range: range(1, 11),
                total: 10
            }
        );
    }

    #[test]
    fn test_bounds_accepts_full_document() {
        assert!(validate_bounds(range(1, 10), 10).is_ok());
        assert!(validate_bounds(range(10, 10), 10).is_ok());
    }

    #[test]
    fn test_even_split_exact() {
        let parts = match even_split(9, 3).unwrap() {
            EvenSplit::Parts(p) => p,
            other => panic!("expected parts, got {:?}", other),
        };
        assert_eq!(parts, vec![range(1, 3), range(4, 6), range(7, 9)]);
    }

    #[test]
    fn test_even_split_remainder() {
        let parts = match even_split(10, 4).unwrap() {
            EvenSplit::Parts(p) => p,
            other => panic!("expected parts, got {:?}", other),
        };
        assert_eq!(parts, vec![range(1, 4), range(5, 8), range(9, 10)]);
    }

    #[test]
    fn test_even_split_single_part() {
        // One part means "no split needed", a distinct outcome.
        assert_eq!(even_split(10, 11).unwrap(), EvenSplit::Single);
        assert_eq!(even_split(10, 10).unwrap(), EvenSplit::Single);
    }

    #[test]
    fn test_even_split_rejects_zero() {
        assert_eq!(even_split(10, 0).unwrap_err(), RangeError::EmptyChunk);
    }

    #[test]
    fn test_even_split_covers_everything_once() {
        for total in 1..=40 {
            for per_part in 1..=12 {
                let ranges = match even_split(total, per_part).unwrap() {
                    EvenSplit::Single => continue,
                    EvenSplit::Parts(p) => p,
                };
                assert!(check_duplicates(&ranges, total).is_empty());
                assert!(check_missing(&ranges, total).is_empty());
                // Ascending and contiguous.
                let mut next = 1;
                for r in &ranges {
                    assert_eq!(r.start, next);
                    assert!(r.start <= r.end);
                    next = r.end + 1;
                }
                assert_eq!(next, total + 1);
            }
        }
    }

    #[test]
    fn test_checks_are_idempotent() {
        let ranges = [range(1, 3), range(2, 4)];
        assert_eq!(
            check_duplicates(&ranges, 10),
            check_duplicates(&ranges, 10)
        );
        assert_eq!(check_missing(&ranges, 10), check_missing(&ranges, 10));
    }

    #[test]
    fn test_coverage_bundles_findings() {
        let ranges = [range(1, 3), range(3, 4), range(9, 20)];
        let coverage = Coverage::of(&ranges, 10);
        assert_eq!(coverage.duplicate_pages, vec![3]);
        assert_eq!(coverage.missing_pages, vec![5, 6, 7, 8]);
        assert_eq!(coverage.invalid_ranges, vec![range(9, 20)]);
        assert!(!coverage.is_clean());

        let clean = Coverage::of(&[range(1, 10)], 10);
        assert!(clean.is_clean());
        assert!(clean.invalid_ranges.is_empty());
    }
}
