//! Native retrieval with fallback to external programs.

use crate::config::UfetchConfig;
use crate::error::FetchError;
use crate::external::{CommandRunner, ManualDownloader, SystemRunner};
use crate::native::{CurlFetcher, NativeFetcher};
use crate::reason::{indicates_missing_secure_transport, SecureTransportMarkers};
use crate::response::{Response, Source};
use std::time::Duration;

/// Fetches URLs natively and hands TLS-capability failures to a [`ManualDownloader`].
#[derive(Debug)]
pub struct UrlFetcher<N = CurlFetcher, R = SystemRunner> {
    native: N,
    manual: ManualDownloader<R>,
    /// None uses the built-in markers.
    markers: Option<SecureTransportMarkers>,
}

impl Default for UrlFetcher {
    fn default() -> Self {
        Self::new(CurlFetcher::default(), ManualDownloader::default())
    }
}

impl UrlFetcher {
    pub fn from_config(cfg: &UfetchConfig) -> Self {
        let fetcher = Self::new(
            CurlFetcher::from_config(cfg),
            ManualDownloader::new(SystemRunner, cfg.tools.clone()),
        );
        if cfg.secure_transport_markers == SecureTransportMarkers::default() {
            fetcher
        } else {
            fetcher.with_markers(cfg.secure_transport_markers.clone())
        }
    }
}

impl<N: NativeFetcher, R: CommandRunner> UrlFetcher<N, R> {
    pub fn new(native: N, manual: ManualDownloader<R>) -> Self {
        Self {
            native,
            manual,
            markers: None,
        }
    }

    pub fn with_markers(mut self, markers: SecureTransportMarkers) -> Self {
        self.markers = Some(markers);
        self
    }

    /// True if the native failure `reason` should send us to the external tools.
    pub fn needs_fallback(&self, reason: &str) -> bool {
        match &self.markers {
            Some(markers) => markers.matches(reason),
            None => indicates_missing_secure_transport(reason),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn manual(&self) -> &ManualDownloader<R> {
        &self.manual
    }

    /// Retrieve `url`, waiting at most `timeout` for the native fetch.
    ///
    /// When the native failure means TLS is unavailable the external tools
    /// are tried instead; they run without a timeout. Other native failures
    /// are returned unchanged.
    pub fn retrieve(&self, url: &str, timeout: Option<Duration>) -> Result<Response, FetchError> {
        tracing::debug!("retrieving URL: {} timeout={:?}", url, timeout);

        match self.native.fetch(url, timeout) {
            Ok(body) => Ok(Response::new(body, Source::Native)),
            Err(e) => {
                tracing::debug!("error opening URL: {}", e);
                tracing::debug!("error.reason = {}", e.reason);
                if self.needs_fallback(&e.reason) {
                    return self.manual.download(url);
                }
                Err(e.into())
            }
        }
    }

    /// Skip the native client and go straight to the external tools.
    pub fn manual_download(&self, url: &str) -> Result<Response, FetchError> {
        self.manual.download(url)
    }
}

/// Retrieve `url` with the default libcurl client and `curl`/`wget` fallback.
pub fn retrieve(url: &str, timeout: Option<Duration>) -> Result<Response, FetchError> {
    UrlFetcher::<CurlFetcher, SystemRunner>::default().retrieve(url, timeout)
}
