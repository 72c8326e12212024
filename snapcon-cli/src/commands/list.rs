use super::{config_name, print_json, Context};
use anyhow::Result;
use colored::Colorize;
use snapcon_core::Snapshot;

pub fn run(ctx: &Context, config: &str) -> Result<()> {
    let config = config_name(config)?;
    let snapshots = ctx.snapper().list_snapshots(&config)?;

    if ctx.json {
        return print_json(&snapshots);
    }

    if snapshots.is_empty() {
        println!("{}", format!("No snapshots in {}", config).yellow());
        return Ok(());
    }

    println!("{}", format!("Snapshots of {}", config).bold().cyan());
    println!();
    println!(
        "{}",
        format!(
            "{:>5}  {:<6}  {:>5}  {:<20}  {:<8}  {:<9}  {}",
            "#", "Type", "Pre", "Date", "User", "Cleanup", "Description"
        )
        .bold()
    );

    for snapshot in &snapshots {
        println!("{}", format_row(snapshot));
    }

    println!();
    println!("{} snapshot(s)", snapshots.len().to_string().cyan());

    Ok(())
}

fn format_row(snapshot: &Snapshot) -> String {
    let kind = if snapshot.is_pre() {
        snapshot.kind.yellow()
    } else if snapshot.is_post() {
        snapshot.kind.green()
    } else {
        snapshot.kind.normal()
    };
    let pre = snapshot
        .pre_snapshot()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let mut row = format!(
        "{:>5}  {:<6}  {:>5}  {:<20}  {:<8}  {:<9}  {}",
        snapshot.id.to_string().yellow(),
        kind,
        pre,
        snapshot.date,
        snapshot.user,
        snapshot.cleanup,
        snapshot.description
    );
    if !snapshot.userdata.is_empty() {
        row.push_str(&format!("  {}", snapshot.userdata.dimmed()));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: u32, kind: &str, pre_id: &str) -> Snapshot {
        Snapshot {
            id,
            kind: kind.to_string(),
            pre_id: pre_id.to_string(),
            date: "2024-01-02 09:01:00".to_string(),
            user: "root".to_string(),
            cleanup: "number".to_string(),
            description: "zypp(zypper)".to_string(),
            userdata: String::new(),
        }
    }

    #[test]
    fn test_format_row_shows_pre_snapshot() {
        colored::control::set_override(false);

        let row = format_row(&snapshot(125, "post", "124"));
        assert!(row.contains("125"));
        assert!(row.contains("post"));
        assert!(row.contains("124"));

        let row = format_row(&snapshot(7, "single", "junk"));
        assert!(!row.contains("junk"));
        assert!(row.contains("single"));
    }
}
