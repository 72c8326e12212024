use super::{config_name, confirm, ok_json, print_json, spinner, Context};
use anyhow::Result;
use colored::Colorize;
use snapcon_core::SnapshotRange;

pub fn run(ctx: &Context, config: &str, range: &str, paths: Vec<String>, yes: bool) -> Result<()> {
    let config = config_name(config)?;
    let range = SnapshotRange::parse(range)?;

    if !ctx.json {
        println!("{}", "Files to be reverted:".bold());
        for path in &paths {
            println!("  {} {}", path, format!("to its state in {}", range.from).yellow());
        }
        println!();
    }

    if !confirm(&format!("Undo {} change(s) in {}?", paths.len(), config), yes)? {
        return Ok(());
    }

    let bar = spinner("Reverting files...");
    let result = ctx.snapper().undo_change(&config, range, &paths);
    bar.finish_and_clear();
    result?;

    if ctx.json {
        return print_json(&ok_json(serde_json::json!({"files": paths.len()})));
    }

    println!(
        "{}",
        format!("✓ Reverted {} file(s)", paths.len()).green().bold()
    );
    Ok(())
}
