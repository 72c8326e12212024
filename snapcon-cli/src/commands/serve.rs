use super::Context;
use anyhow::Result;
use colored::Colorize;
use snapcon_server::ConsoleServer;
use std::net::SocketAddr;
use std::path::PathBuf;

pub async fn run(ctx: Context, bind: Option<SocketAddr>, assets: Option<PathBuf>) -> Result<()> {
    let mut config = ctx.config;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(assets) = assets {
        config.assets_dir = Some(std::fs::canonicalize(&assets)?);
    }

    println!("{}", "Starting snapcon web console...".bold().cyan());
    println!("   {}: {}", "snapper".bold(), config.program);
    println!("   {}: {:?}", "Configs".bold(), config.configs_dir);
    if let Some(timeout) = config.command_timeout() {
        println!("   {}: {:?}", "Command timeout".bold(), timeout);
    }

    let server = ConsoleServer::new(config);
    println!(
        "   {}: {}",
        "Console".bold(),
        format!("http://{}", server.addr()).green()
    );
    println!();
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    server.serve().await
}
