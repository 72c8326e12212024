use super::{config_name, confirm, ok_json, print_json, Context};
use anyhow::Result;
use colored::Colorize;

pub fn run(ctx: &Context, config: &str, id: u32, yes: bool) -> Result<()> {
    let config = config_name(config)?;

    if !confirm(&format!("Delete snapshot {} of {}?", id, config), yes)? {
        return Ok(());
    }

    ctx.snapper().delete(&config, id)?;

    if ctx.json {
        return print_json(&ok_json(serde_json::json!({"id": id})));
    }

    println!("{}", format!("✓ Deleted snapshot {}", id).green().bold());
    Ok(())
}
