//! Parser for the box-drawn tables snapper prints.
//!
//! Depending on locale and terminal, snapper separates columns with either
//! `│` (U+2502) or an ASCII `|`. Both are accepted.

/// Column separators snapper is known to emit.
pub const SEPARATORS: [char; 2] = ['│', '|'];

/// Lines before the first data row: the header and the rule under it.
const HEADER_LINES: usize = 2;

/// Replaces every known separator glyph with `|`.
pub fn normalize_separators(line: &str) -> String {
    line.chars()
        .map(|c| if SEPARATORS.contains(&c) { '|' } else { c })
        .collect()
}

/// Splits one line into trimmed cells.
pub fn split_cells(line: &str) -> Vec<String> {
    normalize_separators(line)
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Parses `raw` into rows of trimmed cells.
///
/// The first two lines are always skipped, as are blank lines and rows with
/// fewer than `min_columns` cells. Row order is preserved.
pub fn parse_table(raw: &str, min_columns: usize) -> Vec<Vec<String>> {
    raw.split('\n')
        .skip(HEADER_LINES)
        .filter(|line| !line.trim().is_empty())
        .map(split_cells)
        .filter(|cells| cells.len() >= min_columns)
        .collect()
}

/// Reads cell `index`, or an empty string when the row is shorter.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR_TABLE: &str = "\
 # │ Type   │ Pre # │ Date
───┼────────┼───────┼─────────────────────
 1 │ single │       │ 2024-01-01 10:00:00
 2 │ pre    │       │ 2024-01-02 11:00:00
";

    #[test]
    fn test_skips_header_and_rule() {
        let rows = parse_table(BAR_TABLE, 4);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1", "single", "", "2024-01-01 10:00:00"]);
        assert_eq!(rows[1][1], "pre");
    }

    #[test]
    fn test_ascii_and_bar_separators_match() {
        let ascii = BAR_TABLE.replace('│', "|");
        assert_eq!(parse_table(&ascii, 4), parse_table(BAR_TABLE, 4));
    }

    #[test]
    fn test_mixed_separators_on_one_line() {
        let raw = "h\nr\na │ b | c\n";
        assert_eq!(parse_table(raw, 3), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_drops_short_rows() {
        let raw = "h\nr\n1 | 2\n1 | 2 | 3\n";
        let rows = parse_table(raw, 3);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_keeps_extra_columns() {
        let raw = "h\nr\n1 | 2 | 3 | 4\n";
        assert_eq!(parse_table(raw, 2)[0].len(), 4);
    }

    #[test]
    fn test_header_lines_skipped_even_if_data_like() {
        let raw = "1 | 2 | 3\n4 | 5 | 6\n7 | 8 | 9";
        assert_eq!(parse_table(raw, 3), vec![vec!["7", "8", "9"]]);
    }

    #[test]
    fn test_blank_and_empty_input() {
        assert!(parse_table("", 1).is_empty());
        assert!(parse_table("h\nr\n\n   \n", 1).is_empty());
    }

    #[test]
    fn test_cell_defaults_to_empty() {
        let row = vec!["a".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 7), "");
    }
}
