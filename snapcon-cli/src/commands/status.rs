use super::{config_name, print_json, Context};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use snapcon_core::{ChangeAction, SnapshotRange};

pub fn run(ctx: &Context, config: &str, range: &str) -> Result<()> {
    let config = config_name(config)?;
    let range = SnapshotRange::parse(range)?;
    let changes = ctx.snapper().status(&config, range)?;

    if ctx.json {
        return print_json(&changes);
    }

    if changes.is_empty() {
        println!("{}", format!("No changes in {}", range).green());
        return Ok(());
    }

    println!(
        "{} {}",
        format!("Changes in {} ({})", range, config).bold().cyan(),
        format!("({})", changes.len()).yellow()
    );
    println!();

    for change in &changes {
        println!("  {} {}", action_icon(change.action), change.path);
    }

    println!();
    println!(
        "Run {} to revert a file",
        format!("snapcon undo {} {} <path>", config, range).cyan()
    );

    Ok(())
}

fn action_icon(action: ChangeAction) -> ColoredString {
    if action.is_created() {
        "+".green()
    } else if action.is_deleted() {
        "-".red()
    } else {
        match action {
            ChangeAction::Modified => "~".yellow(),
            ChangeAction::Code(other) => other.to_string().blue(),
        }
    }
}
