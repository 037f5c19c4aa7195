//! CLI command handlers.

mod completions;
mod config;
mod get;
mod manual;

pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use get::run_get;
pub use manual::run_manual;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use ufetch_core::{Response, Source};

/// Copy the response body to `output`, or to stdout when `None`.
pub(crate) fn write_body(mut rsp: Response, output: Option<&Path>) -> Result<()> {
    let via = match rsp.source() {
        Source::Native => "native client".to_string(),
        Source::External { program } => program.clone(),
    };
    let len = rsp.len();

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            io::copy(&mut rsp, &mut out)?;
            out.flush()?;
            tracing::info!("wrote {} bytes to {} via {}", len, path.display(), via);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            io::copy(&mut rsp, &mut out)?;
            out.flush()?;
            tracing::info!("wrote {} bytes to stdout via {}", len, via);
        }
    }
    Ok(())
}
