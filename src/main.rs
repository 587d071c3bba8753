use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use terminal_queue::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "terminal-queue")]
#[command(about = "Queue of terminals waiting for input, fed by local hook notifications")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.terminal-queue/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a console host: listen for hooks and manage the queue from stdin
    Serve {
        /// Workspace this host answers for (defaults to the current directory)
        #[arg(short, long, conflicts_with = "no_workspace")]
        workspace: Option<PathBuf>,

        /// Run without a workspace (only hooks without one will match)
        #[arg(long)]
        no_workspace: bool,
    },

    /// Notify the host for a workspace that its active terminal needs input
    Notify {
        /// Workspace the hook fired in (defaults to the current directory)
        #[arg(short, long, conflicts_with = "no_workspace")]
        workspace: Option<PathBuf>,

        /// Send no workspace (matches any host)
        #[arg(long)]
        no_workspace: bool,

        /// Keep posting after the first host accepted
        #[arg(long)]
        broadcast: bool,
    },

    /// Show the listener port range and which ports are free
    Ports,

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli.config.clone();

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(config_path.as_deref(), force)?;
        }
        Some(Commands::Ports) => {
            let config = Config::load(config_path.as_deref())?;
            cli::ports::ports_command(&config)?;
        }
        Some(Commands::Notify {
            workspace,
            no_workspace,
            broadcast,
        }) => {
            let config = Config::load(config_path.as_deref())?;
            let workspace = cli::resolve_workspace(workspace, no_workspace);
            cli::notify::notify_command(&config, &workspace, broadcast)?;
        }
        Some(Commands::Serve {
            workspace,
            no_workspace,
        }) => {
            let config = Config::load(config_path.as_deref())?;
            let workspace = cli::resolve_workspace(workspace, no_workspace);
            cli::serve::serve_command(config, workspace).await?;
        }
        None => {
            // Default: run the console host for the current directory
            let config = Config::load(config_path.as_deref())?;
            let workspace = cli::resolve_workspace(None, false);
            cli::serve::serve_command(config, workspace).await?;
        }
    }

    Ok(())
}
