//! Get command: native retrieval with external-program fallback.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use ufetch_core::config::UfetchConfig;
use ufetch_core::UrlFetcher;

use super::write_body;

/// Retrieve `url` and write the body out. `timeout` overrides the config value.
pub fn run_get(
    cfg: &UfetchConfig,
    url: &str,
    timeout: Option<Duration>,
    output: Option<&Path>,
) -> Result<()> {
    let timeout = match timeout {
        Some(t) => Some(t),
        None => cfg.timeout()?,
    };
    let fetcher = UrlFetcher::from_config(cfg);
    let rsp = fetcher.retrieve(url, timeout)?;
    write_body(rsp, output)
}
