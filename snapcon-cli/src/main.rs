use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{configs, create, delete, list, rollback, serve, settings, status, undo, Context};

#[derive(Parser)]
#[command(name = "snapcon")]
#[command(version, about = "Web console and CLI for snapper snapshots", long_about = None)]
struct Cli {
    /// Console settings file (TOML)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// snapper binary to run
    #[arg(long, global = true)]
    snapper: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Serve the UI from this directory instead of the built-in page
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// List snapper configurations
    Configs,

    /// Show the settings of a configuration
    Settings {
        /// Configuration name
        config: String,
    },

    /// List the snapshots of a configuration
    List {
        /// Configuration name
        config: String,
    },

    /// Show files changed between two snapshots
    Status {
        /// Configuration name
        config: String,

        /// Snapshot range, e.g. 12..13 (0 is the live system)
        range: String,
    },

    /// Revert individual files to their state in a snapshot
    Undo {
        /// Configuration name
        config: String,

        /// Snapshot range the changes were made in
        range: String,

        /// Absolute paths to revert
        #[arg(required = true)]
        paths: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Roll the default subvolume back to a snapshot
    Rollback {
        /// Configuration name
        config: String,

        /// Snapshot to roll back to
        id: u32,

        /// Description of the snapshots snapper creates for the rollback
        #[arg(short, long)]
        description: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Create a snapshot
    Create {
        /// Configuration name
        config: String,

        /// Snapshot description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Userdata as key=value[,key=value]
        #[arg(short, long)]
        userdata: Option<String>,
    },

    /// Delete a snapshot
    Delete {
        /// Configuration name
        config: String,

        /// Snapshot to delete
        id: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_logging(serving: bool) {
    let default = if serving { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Serve { .. }));

    let ctx = Context::load(cli.config_file, cli.snapper, cli.json)?;

    match cli.command {
        Commands::Serve { bind, assets } => {
            serve::run(ctx, bind, assets).await?;
        }
        Commands::Configs => {
            configs::run(&ctx)?;
        }
        Commands::Settings { config } => {
            settings::run(&ctx, &config)?;
        }
        Commands::List { config } => {
            list::run(&ctx, &config)?;
        }
        Commands::Status { config, range } => {
            status::run(&ctx, &config, &range)?;
        }
        Commands::Undo {
            config,
            range,
            paths,
            yes,
        } => {
            undo::run(&ctx, &config, &range, paths, yes)?;
        }
        Commands::Rollback {
            config,
            id,
            description,
            yes,
        } => {
            rollback::run(&ctx, &config, id, description, yes)?;
        }
        Commands::Create {
            config,
            description,
            userdata,
        } => {
            create::run(&ctx, &config, &description, userdata)?;
        }
        Commands::Delete { config, id, yes } => {
            delete::run(&ctx, &config, id, yes)?;
        }
    }

    Ok(())
}
