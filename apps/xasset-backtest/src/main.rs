//! xasset-backtest binary
//!
//! Checks, validates and summarises cross-asset backtest payloads.
//!
//! # Usage
//!
//! ```bash
//! xasset-backtest check --all
//! xasset-backtest validate request.json
//! xasset-backtest --config xasset-backtest.yaml summarize response.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (overrides `logging.level`)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use xasset_backtest::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use xasset_backtest::models::BasicBacktestRequest;
use xasset_backtest::request::{apply_defaults, validate_request};
use xasset_backtest::response::{decode_response, summarize};
use xasset_backtest::telemetry::init_tracing;
use xasset_backtest::{ConformanceChecker, Error};

#[derive(Parser, Debug)]
#[command(name = "xasset-backtest", version, about = "Cross-asset backtest datatype tooling")]
struct Cli {
    /// YAML configuration file. Defaults apply when omitted and
    /// `xasset-backtest.yaml` does not exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assert the backtest datatypes are plain data records.
    Check {
        /// Check every datatype, not just the response datatypes.
        #[arg(long)]
        all: bool,
    },
    /// Validate a request body, after applying configured defaults.
    Validate {
        /// Request JSON file.
        path: PathBuf,
    },
    /// Print headline figures of a response body.
    Summarize {
        /// Response JSON file.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            Ok(load_config(Some(path))?)
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Ok(load_config(None)?),
        None => Ok(Config::default()),
    }
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Check { all } => {
            let checker = if all {
                ConformanceChecker::all_datatypes()
            } else {
                ConformanceChecker::response_datatypes()
            };
            let report = checker.check().map_err(Error::from)?;
            tracing::info!(types = report.checked.len(), "all types are plain data records");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Validate { path } => {
            let body = read_body(&path)?;
            let mut request: BasicBacktestRequest =
                serde_json::from_str(&body).map_err(Error::RequestDecode)?;
            apply_defaults(&mut request, &config.defaults);
            validate_request(&request).map_err(Error::from)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Summarize { path } => {
            let body = read_body(&path)?;
            let response = decode_response(&body).map_err(Error::from)?;
            let summary = summarize(&response).map_err(Error::from)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn read_body(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
