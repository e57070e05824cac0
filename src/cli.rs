//! CLI definitions and entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use expect_support::config::SupportConfig;
use expect_support::output::{ConfigReport, FeaturesReport, OutputMode, VersionReport};
use expect_support::MethodResolver;

/// expect-support - inspect expectation support settings
#[derive(Parser, Debug)]
#[command(
    name = "expect-support",
    version,
    about = "Inspect expectation support settings",
    long_about = "Show the configuration and feature flags used when resolving method\n\
                  handles and dispatching failure notifications."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the effective configuration
    Config {
        /// Read this file instead of discovering one
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show feature flags and the method resolution order
    Features {
        /// Read this file instead of discovering one
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show version
    Version,
}

/// Load config from an explicit path, or discover it
fn load_config(path: Option<PathBuf>) -> anyhow::Result<(Option<PathBuf>, SupportConfig)> {
    match path {
        Some(path) => {
            let config = SupportConfig::load(&path)
                .with_context(|| format!("could not load {}", path.display()))?;
            Ok((Some(path), config))
        },
        None => {
            let source = SupportConfig::discover_path();
            Ok((source, SupportConfig::discover()))
        },
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let rendered = match cli.command {
        Some(Command::Config { path }) => {
            let (source, config) = load_config(path)?;
            ConfigReport {
                source: source.map(|p| p.display().to_string()),
                config,
            }
            .render(output_mode)?
        },
        Some(Command::Features { path }) => {
            let (_, config) = load_config(path)?;
            let resolver = MethodResolver::new(config.features);
            FeaturesReport::new(resolver.features(), resolver.fallback_labels()).render(output_mode)?
        },
        Some(Command::Version) | None => VersionReport::current().render(output_mode)?,
    };

    println!("{rendered}");
    Ok(())
}
