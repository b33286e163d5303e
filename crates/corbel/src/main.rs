//! Corbel CLI - documentation site builder for notebook-based projects.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "corbel")]
#[command(about = "Documentation site builder for notebook-based projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to corbel.toml config file
    #[arg(short, long, default_value = "corbel.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site
    Build {
        /// Output directory (defaults to config or "gh-pages")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip CDN asset downloads
        #[arg(long)]
        offline: bool,
    },

    /// Publish a built site to the gh-pages branch
    Publish {
        /// Folder containing the built site
        folder: PathBuf,

        /// Git repository URL
        repository: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Build { output, offline } => {
            commands::build::run(&cli.config, output, offline).await?;
        }
        Commands::Publish { folder, repository } => {
            commands::publish::run(&folder, &repository).await?;
        }
    }

    Ok(())
}
