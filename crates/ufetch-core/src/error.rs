//! Error types returned by the fetcher and the manual downloader.

use std::fmt;
use std::process::ExitStatus;

/// Native fetch failure.
///
/// `reason` is the text the fallback decision is made on; see
/// [`crate::reason::indicates_missing_secure_transport`].
#[derive(Debug)]
pub struct TransportError {
    pub url: String,
    pub reason: String,
    /// HTTP status when the server answered with an error code.
    pub status: Option<u32>,
    source: Option<curl::Error>,
}

impl TransportError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
            status: None,
            source: None,
        }
    }

    pub fn http(url: impl Into<String>, status: u32) -> Self {
        Self {
            url: url.into(),
            reason: format!("HTTP Error {}", status),
            status: Some(status),
            source: None,
        }
    }

    pub fn with_source(mut self, err: curl::Error) -> Self {
        self.source = Some(err);
        self
    }

    /// Underlying libcurl error, if the failure came from libcurl.
    pub fn curl_error(&self) -> Option<&curl::Error> {
        self.source.as_ref()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error opening {}: {}", self.url, self.reason)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Native fetch failed for a reason other than missing TLS support.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// None of the configured download programs is installed.
    #[error(
        "Unable to access the URL {url}.\nPlease install {} (and if you continue to see this message, contact your system administrator).",
        join_programs(.programs)
    )]
    ToolsMissing { url: String, programs: Vec<String> },

    /// A download program ran but exited unsuccessfully.
    #[error("{program} failed ({status}){}", stderr_suffix(.stderr))]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// A download program exists but could not be started.
    #[error("failed to run {program}: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn join_programs(programs: &[String]) -> String {
    match programs {
        [] => "a download program".to_string(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} or {}", rest.join(", "), last),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
