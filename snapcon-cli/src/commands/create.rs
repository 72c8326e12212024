use super::{config_name, ok_json, print_json, spinner, Context};
use anyhow::Result;
use colored::Colorize;

pub fn run(ctx: &Context, config: &str, description: &str, userdata: Option<String>) -> Result<()> {
    let config = config_name(config)?;

    let bar = spinner("Creating snapshot...");
    let result = ctx.snapper().create(&config, description, userdata.as_deref());
    bar.finish_and_clear();
    result?;

    if ctx.json {
        return print_json(&ok_json(serde_json::json!({})));
    }

    println!("{}", "✓ Snapshot created".green().bold());
    println!("  {}: {}", "Config".bold(), config);
    if !description.is_empty() {
        println!("  {}: {}", "Description".bold(), description);
    }
    if let Some(userdata) = userdata {
        println!("  {}: {}", "Userdata".bold(), userdata);
    }
    Ok(())
}
