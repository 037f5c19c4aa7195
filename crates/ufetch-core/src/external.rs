//! Manual download through external programs (`curl`, then `wget`).

use crate::error::FetchError;
use crate::response::{Response, Source};
use serde::{Deserialize, Serialize};
use std::io;
use std::process::{Command, Output, Stdio};

/// An external download program and the fixed flags it is run with.
///
/// The URL is appended as the last argument; the program must write the
/// body to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTool {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExternalTool {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// `curl --silent -L <url>`: quiet, follow redirects, body to stdout.
    pub fn curl() -> Self {
        Self::new("curl", &["--silent", "-L"])
    }

    /// `wget --quiet -O- <url>`: quiet, body to stdout.
    pub fn wget() -> Self {
        Self::new("wget", &["--quiet", "-O-"])
    }

    /// Full argument list for `url`.
    pub fn args_for(&self, url: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(url.to_string());
        args
    }
}

/// Default tool chain, in priority order.
pub fn default_tools() -> Vec<ExternalTool> {
    vec![ExternalTool::curl(), ExternalTool::wget()]
}

/// Runs a program to completion, capturing stdout and stderr.
///
/// Implementations must report a missing executable as
/// `io::ErrorKind::NotFound` and a program that ran as `Ok(Output)`,
/// whatever its exit status.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output>;
}

/// Runs programs from `PATH` with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

/// Tries each configured tool until one is installed.
#[derive(Debug)]
pub struct ManualDownloader<R = SystemRunner> {
    runner: R,
    tools: Vec<ExternalTool>,
}

impl Default for ManualDownloader<SystemRunner> {
    fn default() -> Self {
        Self::new(SystemRunner, default_tools())
    }
}

impl<R: CommandRunner> ManualDownloader<R> {
    pub fn new(runner: R, tools: Vec<ExternalTool>) -> Self {
        Self { runner, tools }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn tools(&self) -> &[ExternalTool] {
        &self.tools
    }

    /// Download `url` with the first installed tool.
    ///
    /// A tool that is installed but fails ends the chain with its own error;
    /// only a missing executable moves on to the next tool.
    pub fn download(&self, url: &str) -> Result<Response, FetchError> {
        let names: Vec<&str> = self.tools.iter().map(|t| t.program.as_str()).collect();
        tracing::debug!("falling back to {} to download: {}", names.join(" or "), url);

        for tool in &self.tools {
            let args = tool.args_for(url);
            tracing::trace!("about to execute: {} {}", tool.program, args.join(" "));
            let output = match self.runner.run(&tool.program, &args) {
                Ok(output) => output,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("unable to call {}: {}", tool.program, e);
                    continue;
                }
                Err(e) => {
                    return Err(FetchError::ToolSpawn {
                        program: tool.program.clone(),
                        source: e,
                    })
                }
            };

            if !output.status.success() {
                return Err(FetchError::ToolFailed {
                    program: tool.program.clone(),
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }

            return Ok(Response::new(
                output.stdout,
                Source::External {
                    program: tool.program.clone(),
                },
            ));
        }

        Err(FetchError::ToolsMissing {
            url: url.to_string(),
            programs: self.tools.iter().map(|t| t.program.clone()).collect(),
        })
    }
}

/// Download `url` with `curl`, falling back to `wget`.
pub fn manual_download(url: &str) -> Result<Response, FetchError> {
    ManualDownloader::<SystemRunner>::default().download(url)
}
