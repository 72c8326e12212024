use super::{config_name, confirm, ok_json, print_json, spinner, Context};
use anyhow::Result;
use colored::Colorize;
use snapcon_core::snapper::default_rollback_description;

pub fn run(ctx: &Context, config: &str, id: u32, description: Option<String>, yes: bool) -> Result<()> {
    let config = config_name(config)?;
    let description = description.unwrap_or_else(|| default_rollback_description(id));

    if !ctx.json {
        println!("{}", "Rollback".bold().cyan());
        println!("  {}: {}", "Config".bold(), config);
        println!("  {}: {}", "Target snapshot".bold(), id);
        println!("  {}: {}", "Description".bold(), description);
        println!();
    }

    if !confirm(&format!("Roll {} back to snapshot {}?", config, id), yes)? {
        return Ok(());
    }

    let bar = spinner("Rolling back...");
    let result = ctx.snapper().rollback(&config, id, &description);
    bar.finish_and_clear();
    result?;

    if ctx.json {
        return print_json(&ok_json(serde_json::json!({"id": id})));
    }

    println!("{}", "✓ Rollback done".green().bold());
    println!("{}", "Reboot to boot into the restored snapshot.".yellow());
    Ok(())
}
