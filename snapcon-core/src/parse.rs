//! Mappers from snapper output to typed records.
//!
//! Every function here is pure. Rows that fail a structural check are
//! dropped one at a time; a malformed row never fails the whole parse.

use crate::models::{Change, ChangeAction, Settings, Snapshot};
use crate::strategy::{first_yielding, Strategy};
use crate::table::{cell, parse_table, split_cells};
use crate::validate::ConfigName;

/// `id, type, pre-id, date, user, cleanup, description` are mandatory;
/// `userdata` only exists on newer snapper builds.
pub const SNAPSHOT_MIN_COLUMNS: usize = 7;

/// Shortest status line that can still carry a code and a path.
pub const CHANGE_MIN_LINE_LEN: usize = 3;

/// Header label of the key column in `snapper get-config`.
pub const SETTINGS_HEADER_KEY: &str = "Key";

/// Header label of the first column in `snapper list-configs`.
const CONFIGS_HEADER_KEY: &str = "Config";

pub fn parse_snapshots(raw: &str) -> Vec<Snapshot> {
    parse_table(raw, SNAPSHOT_MIN_COLUMNS)
        .iter()
        .filter_map(|row| snapshot_from_row(row))
        .collect()
}

fn snapshot_from_row(row: &[String]) -> Option<Snapshot> {
    let id: u32 = cell(row, 0).parse().ok().filter(|id| *id > 0)?;

    Some(Snapshot {
        id,
        kind: cell(row, 1).to_string(),
        pre_id: cell(row, 2).to_string(),
        date: cell(row, 3).to_string(),
        user: cell(row, 4).to_string(),
        cleanup: cell(row, 5).to_string(),
        description: cell(row, 6).to_string(),
        userdata: cell(row, 7).to_string(),
    })
}

pub fn parse_changes(raw: &str) -> Vec<Change> {
    raw.split('\n').filter_map(change_from_line).collect()
}

fn change_from_line(line: &str) -> Option<Change> {
    if line.len() < CHANGE_MIN_LINE_LEN {
        return None;
    }

    let code = line.chars().next()?;
    // The width of the status block differs between snapper versions, so the
    // path is located by its leading separator instead of a column offset.
    let start = line.find('/')?;
    let path = line[start..].trim();

    Some(Change {
        action: ChangeAction::from_code(code),
        path: path.to_string(),
    })
}

pub fn parse_settings(raw: &str) -> Settings {
    let mut settings = Settings::new();

    for line in raw.split('\n') {
        let cells = split_cells(line);
        if cells.len() != 2 {
            continue;
        }

        let (key, value) = (&cells[0], &cells[1]);
        if key.is_empty() || key == SETTINGS_HEADER_KEY || is_border(key) {
            continue;
        }

        settings.insert(key.clone(), value.clone());
    }

    settings
}

/// Renders settings in the two-column layout `snapper get-config` uses.
pub fn format_settings(settings: &Settings) -> String {
    let width = settings
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max(SETTINGS_HEADER_KEY.len());

    let mut out = format!("{:<width$} │ Value\n", SETTINGS_HEADER_KEY, width = width);
    out.push_str(&"─".repeat(width + 1));
    out.push_str("┼──────\n");
    for (key, value) in settings {
        out.push_str(&format!("{:<width$} │ {}\n", key, value, width = width));
    }
    out
}

fn is_border(cell: &str) -> bool {
    cell.chars()
        .all(|c| matches!(c, '─' | '━' | '┼' | '-' | '+' | '=' | ' '))
}

const CONFIG_NAME_STRATEGIES: [Strategy<String>; 2] = [
    Strategy::new("table", config_names_from_table),
    Strategy::new("whitespace", config_names_from_words),
];

/// Parses `snapper list-configs`, trying the boxed table layout first and
/// then a plain whitespace layout.
///
/// Output without the `Config` header yields nothing, and only valid
/// config names are kept, so diagnostics never turn into names.
pub fn parse_config_names(raw: &str) -> Vec<String> {
    first_yielding(&CONFIG_NAME_STRATEGIES, raw)
        .map(|(_, names)| names)
        .unwrap_or_default()
}

fn has_configs_header(raw: &str) -> bool {
    raw.lines()
        .next()
        .and_then(|line| split_cells(line).into_iter().next())
        .and_then(|first| first.split_whitespace().next().map(|w| w == CONFIGS_HEADER_KEY))
        .unwrap_or(false)
}

fn valid_config_name(name: &str) -> Option<String> {
    ConfigName::parse(name).ok().map(String::from)
}

fn config_names_from_table(raw: &str) -> Vec<String> {
    if !has_configs_header(raw) {
        return Vec::new();
    }
    parse_table(raw, 2)
        .iter()
        .map(|row| cell(row, 0))
        .filter(|name| !name.is_empty() && !is_border(name))
        .filter_map(valid_config_name)
        .collect()
}

fn config_names_from_words(raw: &str) -> Vec<String> {
    if !has_configs_header(raw) {
        return Vec::new();
    }
    raw.lines()
        .skip(1)
        .filter(|line| !is_border(line))
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(valid_config_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_OUTPUT: &str = "\
  # │ Type   │ Pre # │ Date                │ User │ Cleanup │ Description  │ Userdata
────┼────────┼───────┼─────────────────────┼──────┼─────────┼──────────────┼─────────
 0  │ single │       │                     │ root │         │ current      │
123 │ single │       │ 2024-01-01 10:00:00 │ root │ number  │ daily backup │ tag=x
124 │ pre    │       │ 2024-01-02 09:00:00 │ root │ number  │ zypp(zypper) │ important=yes
125 │ post   │ 124   │ 2024-01-02 09:01:00 │ root │ number  │              │ important=yes
";

    #[test]
    fn test_parse_snapshot_row() {
        let raw = "h\nr\n123 | single | | 2024-01-01 10:00:00 | root | number | daily backup | tag=x\n";
        let snapshots = parse_snapshots(raw);

        assert_eq!(
            snapshots,
            vec![Snapshot {
                id: 123,
                kind: "single".to_string(),
                pre_id: String::new(),
                date: "2024-01-01 10:00:00".to_string(),
                user: "root".to_string(),
                cleanup: "number".to_string(),
                description: "daily backup".to_string(),
                userdata: "tag=x".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_snapshot_listing() {
        let snapshots = parse_snapshots(LIST_OUTPUT);
        let ids: Vec<u32> = snapshots.iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![123, 124, 125]);
        assert_eq!(snapshots[2].kind, "post");
        assert_eq!(snapshots[2].pre_id, "124");
        assert_eq!(snapshots[2].description, "");
        assert_eq!(snapshots[1].userdata, "important=yes");
    }

    #[test]
    fn test_separator_variants_parse_identically() {
        let ascii = LIST_OUTPUT.replace('│', "|");
        assert_eq!(parse_snapshots(&ascii), parse_snapshots(LIST_OUTPUT));
    }

    #[test]
    fn test_seven_column_listing_has_empty_userdata() {
        let raw = "h\nr\n7 | single | | date | root | | before update\n";
        let snapshots = parse_snapshots(raw);

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].description, "before update");
        assert_eq!(snapshots[0].userdata, "");
    }

    #[test]
    fn test_snapshot_rows_rejected() {
        let raw = "\
h
r
1 | single | | date | root
x | single | | date | root | | desc
12* | single | | date | root | | desc
-3 | single | | date | root | | desc
4 | single | | date | root | | desc
";
        let snapshots = parse_snapshots(raw);

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, 4);
    }

    #[test]
    fn test_snapshot_output_bounded_by_lines() {
        let raw = "1 | a | | d | u | c | x\n2 | a | | d | u | c | x\n3 | a | | d | u | c | x\n";
        let snapshots = parse_snapshots(raw);

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, 3);
    }

    #[test]
    fn test_parse_changes() {
        let raw = "\
c..... /etc/fstab
+..... /etc/new file.conf
-..... /var/log/old.log
t..... /usr/bin/link
..x... /usr/bin/tool
";
        let changes = parse_changes(raw);

        assert_eq!(changes.len(), 5);
        assert_eq!(changes[0].action, ChangeAction::Modified);
        assert_eq!(changes[0].path, "/etc/fstab");
        assert_eq!(changes[1].action, ChangeAction::Code('+'));
        assert_eq!(changes[1].path, "/etc/new file.conf");
        assert_eq!(changes[2].action, ChangeAction::Code('-'));
        assert_eq!(changes[3].action, ChangeAction::Code('t'));
        assert_eq!(changes[4].action, ChangeAction::Code('.'));
        assert!(changes.iter().all(|c| c.path.starts_with('/')));
    }

    #[test]
    fn test_change_status_width_varies() {
        let changes = parse_changes("c.. /a\nc........ /b\r\n");

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].path, "/a");
        assert_eq!(changes[1].path, "/b");
    }

    #[test]
    fn test_change_lines_rejected() {
        let changes = parse_changes("\nc\nc.\nno path here\nc..... /ok\n");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "/ok");
    }

    #[test]
    fn test_parse_settings() {
        let raw = "\
Key              │ Value
─────────────────┼──────
ALLOW_GROUPS     │
NUMBER_LIMIT     │ 2-10
SUBVOLUME        │ /
TIMELINE_CREATE  │ no
";
        let settings = parse_settings(raw);

        assert_eq!(settings.len(), 4);
        assert_eq!(settings["ALLOW_GROUPS"], "");
        assert_eq!(settings["NUMBER_LIMIT"], "2-10");
        assert_eq!(settings["SUBVOLUME"], "/");
        assert!(!settings.contains_key(SETTINGS_HEADER_KEY));
    }

    #[test]
    fn test_settings_ignore_malformed_lines() {
        let raw = "a | b | c\n | orphan\n---|---\nplain text\nK | 1\nK | 2\n";
        let settings = parse_settings(raw);

        assert_eq!(settings.len(), 1);
        assert_eq!(settings["K"], "2");
    }

    #[test]
    fn test_settings_dump_reparses() {
        let raw = "Key | Value\n----+------\nFSTYPE | btrfs\nQGROUP | 1/0\nSPACE_LIMIT | 0.5\n";
        let settings = parse_settings(raw);
        let dumped = format_settings(&settings);

        assert_eq!(parse_settings(&dumped), settings);
        assert_eq!(parse_settings(&format_settings(&parse_settings(&dumped))), settings);
    }

    #[test]
    fn test_config_names_from_table() {
        let raw = "\
Config │ Subvolume
───────┼──────────
home   │ /home
root   │ /
";
        assert_eq!(parse_config_names(raw), vec!["home", "root"]);
    }

    #[test]
    fn test_config_names_from_plain_layout() {
        let raw = "Config   Subvolume\n------------------\nroot     /\nhome     /home\n";
        assert_eq!(parse_config_names(raw), vec!["root", "home"]);
    }

    #[test]
    fn test_config_names_empty() {
        assert!(parse_config_names("").is_empty());
    }

    #[test]
    fn test_config_names_need_header() {
        let raw = "Failed to connect to system bus.\nIO Error (open failed path://-x).\n";
        assert!(config_names_from_words(raw).is_empty());
        assert!(config_names_from_table(raw).is_empty());
        assert!(parse_config_names(raw).is_empty());
        assert!(parse_config_names("Unknown config.\n").is_empty());
    }

    #[test]
    fn test_config_names_drop_invalid_names() {
        let table = "Config | Subvolume\n-------+----------\nroot | /\n-bad | /x\nhome dir | /home\n";
        assert_eq!(config_names_from_table(table), vec!["root"]);

        let plain = "Config   Subvolume\nroot     /\n.hidden  /h\nerror: (boom)\n";
        assert_eq!(config_names_from_words(plain), vec!["root"]);
    }
}
