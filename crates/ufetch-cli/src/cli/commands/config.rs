//! Config command: show the effective configuration.

use anyhow::Result;
use std::path::Path;
use ufetch_core::config::UfetchConfig;

pub fn run_config(cfg: &UfetchConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
