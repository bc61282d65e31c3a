//! Evoke CLI
//!
//! Offline companion to the theme runtime: renders static stylesheets for
//! server-rendered pages, checks theme files and explores colors.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "evoke")]
#[command(author, version, about = "Evoke theming toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a static stylesheet for the configured themes
    Css {
        /// evoke.toml or a directory containing one
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only emit this theme
        #[arg(short, long)]
        theme: Option<String>,

        /// Override the configured custom property prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a configuration for problems the runtime would warn about
    Validate {
        /// evoke.toml or a directory containing one
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print a 50..950 tonal scale as custom properties
    Scale {
        /// Base color as `L C H` or `oklch(L C H)`
        color: String,

        /// Scale name used in property names
        #[arg(short, long, default_value = "primary")]
        name: String,

        #[arg(long, default_value = "ui")]
        prefix: String,

        /// Emit approximate RGB instead of oklch()
        #[arg(long)]
        rgb: bool,
    },

    /// Pick a readable foreground for a background color
    Contrast {
        /// Background as `L C H` or `oklch(L C H)`
        background: String,
    },

    /// Print one theme as JSON
    Export {
        /// Theme name
        theme: String,

        /// evoke.toml or a directory containing one
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter evoke.toml with the built-in themes
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "evoke_cli={level},evoke_theme={level},evoke_color={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Css {
            config,
            theme,
            prefix,
            output,
        } => {
            let config = config::load(config.as_deref())?;
            let sheet = commands::css(&config, theme.as_deref(), prefix.as_deref())?;
            match output {
                Some(path) => {
                    fs::write(&path, sheet)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("wrote {}", path.display());
                }
                None => print!("{sheet}"),
            }
        }
        Commands::Validate { path } => {
            let config = config::load(Some(&path))?;
            print!("{}", commands::validate(&config)?);
        }
        Commands::Scale {
            color,
            name,
            prefix,
            rgb,
        } => print!("{}", commands::scale(&color, &name, &prefix, rgb)?),
        Commands::Contrast { background } => print!("{}", commands::contrast(&background)?),
        Commands::Export { theme, config } => {
            let config = config::load(config.as_deref())?;
            println!("{}", commands::export(&config, &theme)?);
        }
        Commands::Init { path, force } => {
            let written = config::init(&path, force)?;
            println!("Created {}", written.display());
        }
    }

    Ok(())
}
