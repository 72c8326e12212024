//! Argument vectors for every snapper subcommand the console issues.
//!
//! Builders take already validated values; see [`crate::validate`].

use crate::validate::{ConfigName, SnapshotRange};

/// Columns requested from `snapper list`. Asking explicitly keeps the table
/// shape fixed even when a snapper release changes its default columns.
pub const LIST_COLUMNS: &str = "id,type,pre-id,date,user,cleanup,description,userdata";

fn with_config(config: &ConfigName, rest: &[&str]) -> Vec<String> {
    let mut args = vec!["-c".to_string(), config.to_string()];
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}

pub fn list_configs() -> Vec<String> {
    vec!["list-configs".to_string()]
}

pub fn get_config(config: &ConfigName) -> Vec<String> {
    with_config(config, &["get-config"])
}

pub fn list(config: &ConfigName) -> Vec<String> {
    with_config(config, &["list", "--columns", LIST_COLUMNS])
}

pub fn status(config: &ConfigName, range: SnapshotRange) -> Vec<String> {
    with_config(config, &["status", &range.to_string()])
}

pub fn undo_change(config: &ConfigName, range: SnapshotRange, paths: &[String]) -> Vec<String> {
    let mut args = with_config(config, &["undochange", &range.to_string(), "--"]);
    args.extend(paths.iter().cloned());
    args
}

pub fn rollback(config: &ConfigName, id: u32, description: &str) -> Vec<String> {
    with_config(config, &["rollback", "-d", description, &id.to_string()])
}

pub fn create(config: &ConfigName, description: &str, userdata: Option<&str>) -> Vec<String> {
    let mut args = with_config(config, &["create", "--description", description]);
    if let Some(userdata) = userdata {
        args.push("--userdata".to_string());
        args.push(userdata.to_string());
    }
    args
}

pub fn delete(config: &ConfigName, id: u32) -> Vec<String> {
    with_config(config, &["delete", &id.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ConfigName {
        ConfigName::parse("root").unwrap()
    }

    fn range() -> SnapshotRange {
        SnapshotRange::parse("3..4").unwrap()
    }

    #[test]
    fn test_read_only_commands() {
        assert_eq!(list_configs(), vec!["list-configs"]);
        assert_eq!(get_config(&root()), vec!["-c", "root", "get-config"]);
        assert_eq!(
            list(&root()),
            vec![
                "-c",
                "root",
                "list",
                "--columns",
                "id,type,pre-id,date,user,cleanup,description,userdata"
            ]
        );
        assert_eq!(status(&root(), range()), vec!["-c", "root", "status", "3..4"]);
    }

    #[test]
    fn test_undo_change_paths_follow_separator() {
        let paths = vec!["/etc/fstab".to_string(), "/home/a b/*".to_string()];
        assert_eq!(
            undo_change(&root(), range(), &paths),
            vec!["-c", "root", "undochange", "3..4", "--", "/etc/fstab", "/home/a b/*"]
        );
    }

    #[test]
    fn test_rollback() {
        assert_eq!(
            rollback(&root(), 7, "back to 7"),
            vec!["-c", "root", "rollback", "-d", "back to 7", "7"]
        );
    }

    #[test]
    fn test_create() {
        assert_eq!(
            create(&root(), "before update", None),
            vec!["-c", "root", "create", "--description", "before update"]
        );
        assert_eq!(
            create(&root(), "x", Some("tag=1")),
            vec!["-c", "root", "create", "--description", "x", "--userdata", "tag=1"]
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(delete(&root(), 12), vec!["-c", "root", "delete", "12"]);
    }
}
