//! CLI for ufetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ufetch_core::config::{self, UfetchConfig};

use commands::{run_completions, run_config, run_get, run_man, run_manual};

/// Top-level CLI for ufetch.
#[derive(Debug, Parser)]
#[command(name = "ufetch", version)]
#[command(about = "Fetch a URL, falling back to curl or wget when TLS is unavailable", long_about = None)]
pub struct Cli {
    /// More diagnostics (-v: steps and failure reasons, -vv: external commands).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log to stderr instead of the state-dir log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Read configuration from this file instead of ~/.config/ufetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Retrieve a URL natively, using curl or wget if TLS support is missing.
    Get {
        /// URL to retrieve.
        url: String,
        /// Native fetch timeout in seconds (default: config timeout_secs, else none).
        #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
        timeout: Option<Duration>,
        /// Write the body here instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Retrieve a URL with the external programs only.
    Manual {
        /// URL to retrieve.
        url: String,
        /// Write the body here instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration and where it was loaded from.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Render the man page (roff) to stdout.
    Man,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", s))?;
    config::timeout_from_secs(secs).map_err(|e| e.to_string())
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn run(self) -> Result<()> {
        let config_override = self.config;
        match self.command {
            CliCommand::Get {
                url,
                timeout,
                output,
            } => {
                let (cfg, _) = load_config(config_override.as_deref())?;
                run_get(&cfg, &url, timeout, output.as_deref())?;
            }
            CliCommand::Manual { url, output } => {
                let (cfg, _) = load_config(config_override.as_deref())?;
                run_manual(&cfg, &url, output.as_deref())?;
            }
            CliCommand::Config => {
                let (cfg, path) = load_config(config_override.as_deref())?;
                run_config(&cfg, &path)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

/// Load the config selected by `--config`, or the XDG one (created on first use).
fn load_config(explicit: Option<&Path>) -> Result<(UfetchConfig, PathBuf)> {
    let (cfg, path) = match explicit {
        Some(path) => (config::load_from(path)?, path.to_path_buf()),
        None => {
            let path = config::config_path()?;
            (config::load_or_init_at(&path)?, path)
        }
    };
    tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
    Ok((cfg, path))
}

#[cfg(test)]
mod tests;
