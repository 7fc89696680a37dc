//! Rota CLI - request pull request reviewers from a weekly rota

mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rota_core::{Config, ShortfallPolicy};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AssignArgs, RosterArgs};

/// Rota: day-of-week aware reviewer rotation for pull requests
#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the rota config file
    #[arg(short, long, global = true, env = "ROTA_CONFIG")]
    config: Option<PathBuf>,

    /// What to do when a group cannot be filled today (accept or rollover)
    #[arg(long, global = true)]
    shortfall: Option<ShortfallPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Select reviewers and request them on a pull request
    #[command(visible_alias = "a")]
    Assign(AssignArgs),

    /// Show who is available per group
    Roster(RosterArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let Some(command) = cli.command else {
        println!("Rota - day-of-week aware reviewer rotation");
        println!();
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Version => {
            println!("rota {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Assign(args) => {
            let config = load_config(cli.config.as_deref(), cli.shortfall, cli.verbose)?;
            args.execute(cli.verbose, &config).await?;
        }
        Commands::Roster(args) => {
            let config = load_config(cli.config.as_deref(), cli.shortfall, cli.verbose)?;
            args.execute(&config)?;
        }
        Commands::Config => {
            let path = Config::locate(cli.config.as_deref())?;
            let config = load_config(Some(path.as_path()), cli.shortfall, cli.verbose)?;

            println!("Rota Configuration");
            println!("==================");
            println!();
            println!("Config file: {}", path.display());
            println!("Shortfall policy: {}", config.selection.shortfall);
            println!("Reviewers: {}", config.reviewers.len());
            println!();
            println!("Quota:");
            for (group, count) in &config.quota {
                println!("  {}: {}", group, count);
            }
            let warnings = config.validate();
            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
        }
    }

    Ok(())
}

/// Load configuration with overrides and log validation warnings
fn load_config(
    path: Option<&Path>,
    shortfall: Option<ShortfallPolicy>,
    verbose: bool,
) -> anyhow::Result<Config> {
    let config = Config::load_with_overrides(path, shortfall)?;
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    if verbose {
        tracing::info!(
            groups = config.quota.len(),
            reviewers = config.reviewers.len(),
            shortfall = %config.selection.shortfall,
            "Configuration loaded"
        );
    }

    Ok(config)
}
