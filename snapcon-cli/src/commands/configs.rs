use super::{print_json, Context};
use anyhow::Result;
use colored::Colorize;

pub fn run(ctx: &Context) -> Result<()> {
    let configs = ctx.snapper().list_configs()?;

    if ctx.json {
        return print_json(&configs);
    }

    if configs.is_empty() {
        println!("{}", "No snapper configurations found".yellow());
        return Ok(());
    }

    println!("{}", "Configurations".bold().cyan());
    for name in configs {
        println!("  • {}", name);
    }

    Ok(())
}
