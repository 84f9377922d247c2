//! Modsort CLI - order modules by their declared dependencies

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use modsort::{SorterConfig, TieBreak};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "modsort")]
#[command(about = "Order modules so that dependencies come first", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sorter configuration file
    #[arg(long, global = true, env = "MODSORT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the modules of a manifest in dependency order
    Order {
        /// Manifest file (.toml or .json)
        manifest: PathBuf,

        /// Ordering among independent modules (input, lexical)
        #[arg(long)]
        tie_break: Option<TieBreak>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that a manifest can be ordered
    Check {
        /// Manifest file (.toml or .json)
        manifest: PathBuf,
    },
}

/// Output format for `order`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One module name per line
    Text,
    /// JSON array of module names
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => SorterConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SorterConfig::load()?,
    };

    match cli.command {
        Commands::Order {
            manifest,
            tie_break,
            format,
        } => {
            if let Some(tie_break) = tie_break {
                config.tie_break = tie_break;
            }
            let output = commands::order(&manifest, &config, format)?;
            print!("{}", output);
        }

        Commands::Check { manifest } => {
            let output = commands::check(&manifest, &config)?;
            println!("{}", output);
        }
    }

    Ok(())
}
