//! Tally CLI - keep board game scores from the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tally::config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Tally - player roster and score sheet for board games
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ./tally.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Language for display strings: en or pl (default: from the environment)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick players and keep score interactively
    Play,

    /// Run a script of roster and score commands
    Run {
        /// Script file, one command per line (default: stdin)
        script: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_filter.as_deref());
    let language = config.resolve_language(args.lang.as_deref());

    let result = match args.command {
        Commands::Play => cli::play::execute(&config, &language),
        Commands::Run { script, format } => cli::run::execute(&config, &language, script, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or("tally=warn")));

    let format = env::var("TALLY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
