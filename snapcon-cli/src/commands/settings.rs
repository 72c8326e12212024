use super::{config_name, print_json, Context};
use anyhow::Result;
use colored::Colorize;

pub fn run(ctx: &Context, config: &str) -> Result<()> {
    let config = config_name(config)?;
    let settings = ctx.snapper().get_config(&config)?;

    if ctx.json {
        return print_json(&settings);
    }

    println!("{}", format!("Settings of {}", config).bold().cyan());
    println!();

    let width = settings.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, value) in &settings {
        let value = if value.is_empty() {
            "-".dimmed()
        } else {
            value.normal()
        };
        println!("  {:<width$}  {}", key.bold(), value, width = width);
    }

    Ok(())
}
