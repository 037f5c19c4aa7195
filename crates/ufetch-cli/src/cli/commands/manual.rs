//! Manual command: external programs only.

use anyhow::Result;
use std::path::Path;
use ufetch_core::config::UfetchConfig;
use ufetch_core::{ManualDownloader, SystemRunner};

use super::write_body;

pub fn run_manual(cfg: &UfetchConfig, url: &str, output: Option<&Path>) -> Result<()> {
    let downloader = ManualDownloader::new(SystemRunner, cfg.tools.clone());
    let rsp = downloader.download(url)?;
    write_body(rsp, output)
}
