//! Line classification and table region segmentation.

use std::ops::Range;

/// Kind of a contiguous line region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Table,
    Prose,
}

/// A contiguous, half-open range of line indices tagged with its kind.
///
/// Regions computed by [`segment`] are non-overlapping and exhaustive: every
/// line index of the document belongs to exactly one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub lines: Range<usize>,
}

/// Returns true if `line` is treated as part of a Markdown table.
///
/// The test is purely syntactic: at least two `|` characters. It has known
/// false positives (prose containing two literal pipes) and false negatives
/// (a single-column table bordered by fewer than two pipes); both are
/// accepted behavior, which is why this lives here as a named predicate
/// instead of being inlined into the segmenter.
pub fn is_table_line(line: &str) -> bool {
    line.matches('|').count() >= 2
}

/// Partition a document's lines into an ordered sequence of regions.
///
/// A `Table` region is a maximal run of consecutive table-verdict lines
/// (length >= 1); everything between table regions becomes a `Prose` region.
pub fn segment(lines: &[&str]) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut in_table = false;
    let mut start = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let table = is_table_line(line);
        if table != in_table {
            if i > start {
                regions.push(Region {
                    kind: if in_table {
                        RegionKind::Table
                    } else {
                        RegionKind::Prose
                    },
                    lines: start..i,
                });
            }
            in_table = table;
            start = i;
        }
    }

    if lines.len() > start {
        regions.push(Region {
            kind: if in_table {
                RegionKind::Table
            } else {
                RegionKind::Prose
            },
            lines: start..lines.len(),
        });
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_pipe_is_not_a_table_line() {
        assert!(!is_table_line("a | b"));
    }

    #[test]
    fn two_pipes_is_a_table_line() {
        assert!(is_table_line("| a |"));
        assert!(is_table_line("a | b | c"));
    }

    #[test]
    fn empty_document_has_no_regions() {
        assert_eq!(segment(&[]), vec![]);
    }

    #[test]
    fn all_prose_is_one_region() {
        let lines = ["first", "second", "third"];
        assert_eq!(
            segment(&lines),
            vec![Region {
                kind: RegionKind::Prose,
                lines: 0..3,
            }]
        );
    }

    #[test]
    fn table_at_end_of_document_is_closed() {
        let lines = ["intro", "| a | b |", "| 1 | 2 |"];
        assert_eq!(
            segment(&lines),
            vec![
                Region {
                    kind: RegionKind::Prose,
                    lines: 0..1,
                },
                Region {
                    kind: RegionKind::Table,
                    lines: 1..3,
                },
            ]
        );
    }

    #[test]
    fn regions_are_contiguous_and_exhaustive() {
        let lines = [
            "prose", "| a | b |", "| 1 | 2 |", "more prose", "", "| x | y |", "end",
        ];
        let regions = segment(&lines);
        let mut next = 0usize;
        for region in &regions {
            assert_eq!(region.lines.start, next, "regions must be contiguous");
            assert!(region.lines.start < region.lines.end);
            next = region.lines.end;
        }
        assert_eq!(next, lines.len(), "regions must cover every line");
    }

    #[test]
    fn adjacent_regions_alternate_kind() {
        let lines = ["a", "| x | y |", "b", "| p | q |"];
        let regions = segment(&lines);
        for pair in regions.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
