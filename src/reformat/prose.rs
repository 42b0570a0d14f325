//! Prose line cleaning.
//!
//! Each rule is a named function so the narrow, content-specific heuristics
//! ([`collapse_comma_spacing`], [`strip_footnote_digits`]) stay independently
//! testable and trivially removable.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BREAK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static RE_INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?\s*(?:u|em|strong)\s*>").unwrap());
static RE_COMMA_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z])\s*,\s*([A-Za-z])").unwrap());
static RE_FOOTNOTE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\s)\d{1,2}\s+([A-Z])").unwrap());
static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replace HTML line-break markers (`<br>`, `<br/>`, `<br />`) with a space.
pub fn replace_break_markers(text: &str) -> String {
    RE_BREAK_MARKER.replace_all(text, " ").to_string()
}

/// Strip inline markup tags (`<u>`, `<em>`, `<strong>` and their closers),
/// preserving the enclosed text.
pub fn strip_inline_tags(text: &str) -> String {
    RE_INLINE_TAG.replace_all(text, "").to_string()
}

/// Canonicalize comma-separated words to a single space after the comma
/// ("Boston ,  MA" becomes "Boston, MA"). Restricted to letters on both
/// sides; numeric thousands separators ("1,000") must not be rewritten.
pub fn collapse_comma_spacing(text: &str) -> String {
    RE_COMMA_SPACING.replace_all(text, "$1, $2").to_string()
}

/// Remove isolated 1-2 digit numbers sitting between whitespace and a
/// capitalized word; these are stray footnote markers left behind by PDF
/// extraction. Known false-positive risk for legitimate small numbers in
/// exactly that position.
pub fn strip_footnote_digits(text: &str) -> String {
    RE_FOOTNOTE_DIGITS.replace_all(text, "$1$2").to_string()
}

/// Clean a non-table line: break markers to spaces, inline tags stripped,
/// comma spacing canonicalized, stray footnote digits removed, whitespace
/// runs collapsed, and the result trimmed.
pub fn clean_line(line: &str) -> String {
    let s = replace_break_markers(line);
    let s = strip_inline_tags(&s);
    let s = collapse_comma_spacing(&s);
    let s = strip_footnote_digits(&s);
    let s = RE_WHITESPACE_RUN.replace_all(&s, " ");
    s.trim().to_string()
}
