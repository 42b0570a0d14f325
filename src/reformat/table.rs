//! Table cell parsing, column width planning, and row rendering.

use once_cell::sync::Lazy;
use regex::Regex;

use super::prose::{replace_break_markers, strip_inline_tags};

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_PIPE_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\s*").unwrap());

/// Column width floor for every column.
const MIN_WIDTH: usize = 8;
/// Upper bound of the "short" tier: columns at most this wide keep exact width.
const SHORT_MAX: usize = 25;
/// Upper bound of the "medium" tier.
const MEDIUM_MAX: usize = 60;
/// Width floor for medium columns.
const MEDIUM_MIN_WIDTH: usize = 15;
/// Width cap and floor for long columns.
const LONG_CAP: usize = 50;
const LONG_MIN_WIDTH: usize = 30;
/// Characters reserved for the ellipsis when a cell is truncated.
const ELLIPSIS_RESERVE: usize = 3;

/// Conservative cleanup applied to a table line before cell splitting.
///
/// Deliberately weaker than prose cleaning: it must never merge or corrupt
/// cell boundaries. Break markers become a space, inline markup tags are
/// stripped (text kept), whitespace runs collapse to one space, and spacing
/// around `|` is normalized to exactly one space on each side.
pub fn clean_table_line(line: &str) -> String {
    let s = replace_break_markers(line);
    let s = strip_inline_tags(&s);
    let s = RE_WHITESPACE_RUN.replace_all(&s, " ");
    RE_PIPE_SPACING.replace_all(&s, " | ").trim().to_string()
}

/// Returns true for pre-existing separator lines (dashes, pipes, alignment
/// colons, and spaces only). These are dropped before row parsing; the
/// renderer always synthesizes its own separator.
pub fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Split a table line into ordered, trimmed cells.
///
/// The empty first and last pieces produced by a leading/trailing `|` are
/// artifacts of the border and are dropped; interior empty pieces are kept,
/// since they represent empty table entries. A degenerate all-pipe line
/// yields an empty row.
pub fn parse_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split('|').map(|piece| piece.trim().to_string()).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn cell_len(cell: &str) -> usize {
    // Codepoint count, not byte length: naive byte padding misaligns on
    // multi-byte text. Grapheme clusters and double-width glyphs are not
    // handled.
    cell.chars().count()
}

/// Compute a target display width per column from the region's cell lengths.
///
/// Three tiers by the column's longest cell: short columns keep their exact
/// width, medium columns compress toward the average, long columns are
/// capped and truncated at render time.
pub fn plan_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    (0..max_columns)
        .map(|col| {
            let lengths: Vec<usize> = rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell_len(cell))
                .collect();
            if lengths.is_empty() {
                return MIN_WIDTH;
            }
            let max = *lengths.iter().max().unwrap_or(&0);
            let avg = lengths.iter().sum::<usize>() / lengths.len();

            if max <= SHORT_MAX {
                max.max(MIN_WIDTH)
            } else if max <= MEDIUM_MAX {
                (max * 4 / 5).min(avg + 10).max(MEDIUM_MIN_WIDTH)
            } else {
                avg.max(LONG_MIN_WIDTH).min(LONG_CAP)
            }
        })
        .collect()
}

/// Pad a cell to `width`, or truncate it on word boundaries with a trailing
/// ellipsis. The rendered cell is always exactly `width` characters.
fn format_cell(cell: &str, width: usize) -> String {
    let len = cell_len(cell);
    if len <= width {
        let mut out = cell.to_string();
        out.extend(std::iter::repeat(' ').take(width - len));
        return out;
    }

    let budget = width.saturating_sub(ELLIPSIS_RESERVE);
    let mut buf = String::new();
    let mut buf_len = 0usize;
    for word in cell.split_whitespace() {
        let word_len = cell_len(word);
        let needed = if buf_len == 0 { word_len } else { buf_len + 1 + word_len };
        if needed > budget {
            break;
        }
        if buf_len > 0 {
            buf.push(' ');
        }
        buf.push_str(word);
        buf_len = needed;
    }
    if buf_len == 0 {
        // No whole word fits; hard truncation.
        buf = cell.chars().take(budget).collect();
        buf_len = cell_len(&buf);
    }

    buf.push_str("...");
    buf_len += ELLIPSIS_RESERVE;
    buf.extend(std::iter::repeat(' ').take(width - buf_len));
    buf
}

/// Re-emit a table region's rows as aligned Markdown lines.
///
/// Row 0 is the header; a separator line of hyphens is synthesized directly
/// after it. Rows shorter than the plan are padded with empty cells, so the
/// output is always rectangular.
pub fn render(rows: &[Vec<String>], widths: &[usize]) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len() + 1);

    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format_cell(cell, width)
            })
            .collect();
        out.push(format!("| {} |", cells.join(" | ")));

        if i == 0 {
            let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            out.push(format!("| {} |", dashes.join(" | ")));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_cells_drops_border_artifacts() {
        assert_eq!(parse_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(parse_cells("a | b"), vec!["a", "b"]);
    }

    #[test]
    fn parse_cells_keeps_interior_empties() {
        assert_eq!(parse_cells("| a |  | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn parse_cells_all_pipes_is_empty_row() {
        assert_eq!(parse_cells("|"), Vec::<String>::new());
    }

    #[test]
    fn clean_table_line_normalizes_pipe_spacing() {
        assert_eq!(clean_table_line("|a|b   |c|"), "| a | b | c |");
    }

    #[test]
    fn clean_table_line_strips_markup_keeps_text() {
        assert_eq!(clean_table_line("| <em>x</em> | y<br>z |"), "| x | y z |");
    }

    #[test]
    fn separator_lines_are_detected() {
        assert!(is_separator_line("|----|----|"));
        assert!(is_separator_line("| --- | :--: |"));
        assert!(!is_separator_line("| a | b |"));
        assert!(!is_separator_line(""));
    }

    #[test]
    fn short_columns_keep_exact_width_with_floor() {
        let rows = vec![
            vec!["name".to_string(), "x".to_string()],
            vec!["frobnicator".to_string(), "y".to_string()],
        ];
        assert_eq!(plan_widths(&rows), vec![11, 8]);
    }

    #[test]
    fn missing_column_gets_floor_width() {
        // Second column exists in the plan only through the longer row.
        let rows = vec![vec!["a".to_string()], vec!["b".to_string(), String::new()]];
        // Column 1 has one present cell of length 0: short tier, floor 8.
        assert_eq!(plan_widths(&rows), vec![8, 8]);
    }

    #[test]
    fn medium_columns_compress_toward_average() {
        // max = 40, avg = (40 + 10) / 2 = 25.
        // width = max(min(40 * 0.8 = 32, 25 + 10 = 35), 15) = 32
        let rows = vec![vec!["a".repeat(40)], vec!["b".repeat(10)]];
        assert_eq!(plan_widths(&rows), vec![32]);
    }

    #[test]
    fn long_columns_are_capped_at_fifty() {
        // max = 70, avg = 70: width = min(50, max(30, 70)) = 50.
        let rows = vec![vec!["a".repeat(70)], vec!["b".repeat(70)]];
        assert_eq!(plan_widths(&rows), vec![50]);
    }

    #[test]
    fn long_columns_have_floor_thirty() {
        // max = 100, avg = (100 + 4 + 4) / 3 = 36 -> min(50, 36) = 36.
        let rows = vec![vec!["a".repeat(100)], vec!["b".repeat(4)], vec!["c".repeat(4)]];
        assert_eq!(plan_widths(&rows), vec![36]);
        // max = 61 with tiny average still floors at 30.
        let rows = vec![vec!["a".repeat(61)], vec!["b".to_string()], vec!["c".to_string()]];
        assert_eq!(plan_widths(&rows), vec![30]);
    }

    #[test]
    fn format_cell_pads_to_width() {
        assert_eq!(format_cell("ab", 5), "ab   ");
        assert_eq!(format_cell("abcde", 5), "abcde");
    }

    #[test]
    fn format_cell_truncates_on_word_boundary() {
        // budget = 12 - 3 = 9; "alpha" fits, "alpha beta" (10) does not.
        let out = format_cell("alpha beta gamma delta", 12);
        assert_eq!(out, "alpha...    ");
        assert_eq!(out.chars().count(), 12);
    }

    #[test]
    fn format_cell_hard_truncates_when_no_word_fits() {
        let out = format_cell("supercalifragilistic", 10);
        assert_eq!(out, "superca...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn format_cell_counts_codepoints_not_bytes() {
        let out = format_cell("héllo", 8);
        assert_eq!(out.chars().count(), 8);
    }

    #[test]
    fn render_emits_separator_after_header() {
        let rows = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        let widths = plan_widths(&rows);
        let lines = render(&rows, &widths);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "| A        | B        |");
        assert_eq!(lines[1], "| -------- | -------- |");
        assert_eq!(lines[2], "| 1        | 2        |");
    }

    #[test]
    fn render_is_rectangular_with_ragged_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ];
        let widths = plan_widths(&rows);
        let lines = render(&rows, &widths);
        let len0 = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), len0);
        }
    }

    #[test]
    fn rendered_cells_match_plan_widths_exactly() {
        let rows = vec![
            vec!["header one".to_string(), "h2".to_string()],
            vec!["x".repeat(70), "y".to_string()],
        ];
        let widths = plan_widths(&rows);
        for line in render(&rows, &widths) {
            let cells = &line.split('|').collect::<Vec<_>>();
            // Drop boundary empties from the leading "| " and trailing " |".
            let inner = &cells[1..cells.len() - 1];
            assert_eq!(inner.len(), widths.len());
            for (cell, &width) in inner.iter().zip(widths.iter()) {
                // Each cell is rendered as " <content> " around the joins.
                assert_eq!(cell.chars().count(), width + 2);
            }
        }
    }

    #[test]
    fn truncated_cell_ends_with_ellipsis_at_exact_width() {
        let cell = "w".repeat(70);
        let out = format_cell(&cell, 50);
        assert_eq!(out.chars().count(), 50);
        assert!(out.ends_with("..."));
    }
}
