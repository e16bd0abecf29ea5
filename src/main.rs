//! Washline CLI
//!
//! Entry point for the `washline` server binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use washline::config::{CliOverrides, EffectiveConfig};

#[derive(Parser)]
#[command(name = "washline")]
#[command(about = "Authoritative state server for a shared washer/dryer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Path to a TOML config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Listen address, e.g. 0.0.0.0:5000
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the effective configuration and exit
    CheckConfig {
        /// Path to a TOML config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => run_serve(config, bind),
        Commands::CheckConfig { config } => run_check_config(config),
    }
}

fn load_config(path: Option<PathBuf>, bind: Option<String>) -> EffectiveConfig {
    match EffectiveConfig::build(path.as_deref(), &CliOverrides { bind }) {
        Ok(effective) => effective,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_serve(config: Option<PathBuf>, bind: Option<String>) {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let effective = load_config(config, bind);
    tracing::info!(
        sources = ?effective.sources,
        notifier = ?effective.config.notifier.kind,
        "configuration loaded"
    );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(washline::server::serve(&effective.config)) {
        tracing::error!(error = %e, "server failed");
        process::exit(1);
    }
}

fn run_check_config(config: Option<PathBuf>) {
    let effective = load_config(config, None);
    match serde_json::to_string_pretty(&effective.redacted()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
