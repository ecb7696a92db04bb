//! Command line front-end.
//!
//! Usage:
//!   reshape list <config-file>
//!   reshape apply <config-file> --response <response.json> --event <event.json>

use crate::config::Config;
use crate::response::Response;
use crate::serve_event::ServeEvent;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Reshape - response transformers for HTTP mock servers
#[derive(Parser, Debug)]
#[command(name = "reshape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the transformers registered by a configuration file
    List {
        /// Path to the YAML configuration file
        config: PathBuf,
    },
    /// Run the configured transformers over a response
    Apply {
        /// Path to the YAML configuration file
        config: PathBuf,
        /// Response document (JSON)
        #[arg(short, long)]
        response: PathBuf,
        /// Serve event document (JSON)
        #[arg(short, long)]
        event: PathBuf,
    },
}

/// Execute `cli` and return what should be printed to stdout.
pub fn run(cli: Cli) -> Result<String, anyhow::Error> {
    match cli.command {
        Command::List { config } => list(&config),
        Command::Apply {
            config,
            response,
            event,
        } => apply(&config, &response, &event),
    }
}

fn list(config_path: &Path) -> Result<String, anyhow::Error> {
    let registry = Config::from_file(config_path)?.build_registry()?;

    let mut out = String::new();
    for registration in registry.registrations() {
        let scope = if registration.is_global() {
            "global"
        } else {
            "opt-in"
        };
        out.push_str(&format!("{}\t{}\n", registration.name(), scope));
    }
    Ok(out)
}

fn apply(
    config_path: &Path,
    response_path: &Path,
    event_path: &Path,
) -> Result<String, anyhow::Error> {
    let registry = Config::from_file(config_path)?.build_registry()?;
    let response: Response = read_json(response_path)?;
    let event: ServeEvent = read_json(event_path)?;

    let transformed = registry.dispatch(&response, &event);
    let json = serde_json::to_string_pretty(&transformed)?;
    Ok(json + "\n")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
