//! Table-aware Markdown reformatter.
//!
//! Takes raw, noisy Markdown emitted by an external PDF-to-Markdown
//! converter and rewrites it into uniformly formatted Markdown while
//! preserving tabular structure. The pipeline is pure and synchronous: lines
//! are partitioned into table and prose regions, table regions are re-parsed
//! and re-rendered with planned column widths, prose lines are cleaned, and
//! the pieces are reassembled in original order with whole-document
//! normalization at the end.

pub mod prose;
pub mod region;
pub mod table;

pub use region::{is_table_line, segment, Region, RegionKind};

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPLIT_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(https?://[^\s<]*)\s*<br\s*/?>\s*\n\s*").unwrap());
static RE_EMPTY_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*#{1,6}\s*$\n?").unwrap());
static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

/// Rejoin URLs that a break marker split across two lines.
///
/// Runs before any per-line cleaning: the prose cleaner replaces break
/// markers with spaces, which would erase the evidence this rule needs.
pub(crate) fn repair_split_urls(text: &str) -> String {
    RE_SPLIT_URL.replace_all(text, "$1").to_string()
}

/// Whole-document cleanup applied after reassembly: drop heading-marker
/// lines with no title text, then collapse runs of three or more blank
/// lines to a single blank line.
fn finalize(text: &str) -> String {
    let s = RE_EMPTY_HEADING.replace_all(text, "");
    RE_BLANK_RUN.replace_all(&s, "\n\n").to_string()
}

/// Rewrite one table region.
///
/// Regions shorter than two raw lines pass through untouched; there is no
/// point reformatting a single-line "table", and it keeps a stray two-pipe
/// prose line from being rewritten. Pre-existing separator lines are dropped
/// before row parsing; the renderer synthesizes its own.
fn reformat_table(lines: &[&str]) -> Vec<String> {
    if lines.len() < 2 {
        return lines.iter().map(|l| l.to_string()).collect();
    }

    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| table::clean_table_line(line))
        .filter(|line| !table::is_separator_line(line))
        .map(|line| table::parse_cells(&line))
        .collect();

    let widths = table::plan_widths(&rows);
    if widths.is_empty() {
        return Vec::new();
    }
    table::render(&rows, &widths)
}

/// Reformat a Markdown document.
///
/// Pure function of its input; callable concurrently for independent
/// documents. Idempotent on already-clean input up to re-truncation of
/// previously truncated cells.
pub fn reformat(text: &str) -> String {
    let repaired = repair_split_urls(text);
    let lines: Vec<&str> = repaired.lines().collect();

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for region in segment(&lines) {
        let slice = &lines[region.lines.clone()];
        match region.kind {
            RegionKind::Prose => out.extend(slice.iter().map(|line| prose::clean_line(line))),
            RegionKind::Table => out.extend(reformat_table(slice)),
        }
    }

    finalize(&out.join("\n"))
}
