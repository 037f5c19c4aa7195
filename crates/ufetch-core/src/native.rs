//! Native fetch through libcurl (the `curl` crate).

use crate::config::UfetchConfig;
use crate::error::TransportError;
use std::time::Duration;

/// Built-in network fetch capability.
pub trait NativeFetcher {
    /// Download the full body of `url`. `None` waits indefinitely.
    fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError>;
}

/// Options for the libcurl Easy handle used by [`CurlFetcher`].
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub max_redirections: u32,
    pub connect_timeout: Option<Duration>,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            max_redirections: 10,
            connect_timeout: None,
        }
    }
}

impl CurlFetcher {
    pub fn from_config(cfg: &UfetchConfig) -> Self {
        Self {
            max_redirections: cfg.max_redirections,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl NativeFetcher for CurlFetcher {
    fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError> {
        let fail = |e: curl::Error| TransportError::new(url, curl_reason(url, &e)).with_source(e);
        let timeout = match timeout {
            Some(t) => Some(
                curl_timeout(t).ok_or_else(|| TransportError::new(url, "timeout must be positive"))?,
            ),
            None => None,
        };
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(fail)?;
        easy.follow_location(true).map_err(fail)?;
        easy.max_redirections(self.max_redirections).map_err(fail)?;
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d).map_err(fail)?;
        }
        // libcurl's default (0) is no timeout at all.
        if let Some(t) = timeout {
            easy.timeout(t).map_err(fail)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(fail)?;
            transfer.perform().map_err(fail)?;
        }

        // 0 for schemes without status codes (file://).
        let code = easy.response_code().map_err(fail)?;
        if code >= 400 {
            return Err(TransportError::http(url, code));
        }
        Ok(body)
    }
}

/// libcurl takes whole milliseconds and reads 0 as "no timeout", so
/// sub-millisecond values are raised to 1 ms. Zero is rejected.
fn curl_timeout(t: Duration) -> Option<Duration> {
    if t.is_zero() {
        None
    } else {
        Some(t.max(Duration::from_millis(1)))
    }
}

/// Reason text for a libcurl failure.
///
/// Missing protocol support and certificate verification failures are
/// rendered with the markers in [`crate::reason`]; everything else keeps
/// libcurl's own wording.
pub fn curl_reason(url: &str, e: &curl::Error) -> String {
    if e.is_unsupported_protocol() {
        if let Ok(parsed) = url::Url::parse(url) {
            return format!("unknown url type: {}", parsed.scheme());
        }
    }
    if e.is_peer_failed_verification()
        || e.is_ssl_cacert()
        || e.is_ssl_cacert_badfile()
        || e.is_ssl_certproblem()
    {
        return format!("[SSL: CERTIFICATE_VERIFY_FAILED] {}", describe(e));
    }
    describe(e)
}

fn describe(e: &curl::Error) -> String {
    match e.extra_description() {
        Some(extra) => format!("{}: {}", e.description(), extra),
        None => e.description().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::indicates_missing_secure_transport;

    // CURLE_UNSUPPORTED_PROTOCOL
    const UNSUPPORTED_PROTOCOL: i32 = 1;
    // CURLE_COULDNT_CONNECT
    const COULDNT_CONNECT: i32 = 7;
    // CURLE_PEER_FAILED_VERIFICATION
    const PEER_FAILED_VERIFICATION: i32 = 60;

    #[test]
    fn unsupported_https_reads_as_unknown_url_type() {
        let e = curl::Error::new(UNSUPPORTED_PROTOCOL as _);
        let reason = curl_reason("https://example.org/data.txt", &e);
        assert_eq!(reason, "unknown url type: https");
        assert!(indicates_missing_secure_transport(&reason));
    }

    #[test]
    fn unsupported_other_scheme_does_not_trigger_fallback() {
        let e = curl::Error::new(UNSUPPORTED_PROTOCOL as _);
        let reason = curl_reason("gopher://example.org/", &e);
        assert_eq!(reason, "unknown url type: gopher");
        assert!(!indicates_missing_secure_transport(&reason));
    }

    #[test]
    fn certificate_failure_carries_marker() {
        let e = curl::Error::new(PEER_FAILED_VERIFICATION as _);
        let reason = curl_reason("https://example.org/", &e);
        assert!(reason.starts_with("[SSL: CERTIFICATE_VERIFY_FAILED] "));
        assert!(indicates_missing_secure_transport(&reason));
    }

    #[test]
    fn other_errors_keep_libcurl_wording() {
        let e = curl::Error::new(COULDNT_CONNECT as _);
        let reason = curl_reason("http://127.0.0.1:1/", &e);
        assert_eq!(reason, e.description());
        assert!(!indicates_missing_secure_transport(&reason));
    }

    #[test]
    fn sub_millisecond_timeouts_round_up() {
        assert_eq!(curl_timeout(Duration::from_micros(500)), Some(Duration::from_millis(1)));
        assert_eq!(curl_timeout(Duration::from_nanos(1)), Some(Duration::from_millis(1)));
        assert_eq!(curl_timeout(Duration::from_secs(3)), Some(Duration::from_secs(3)));
        assert_eq!(curl_timeout(Duration::ZERO), None);
    }

    #[test]
    fn zero_timeout_is_rejected_before_any_transfer() {
        let err = CurlFetcher::default()
            .fetch("http://127.0.0.1:1/", Some(Duration::ZERO))
            .unwrap_err();
        assert_eq!(err.reason, "timeout must be positive");
        assert!(err.curl_error().is_none());
    }

    #[test]
    fn from_config_copies_native_options() {
        let mut cfg = UfetchConfig::default();
        cfg.max_redirections = 3;
        cfg.connect_timeout_secs = Some(5);
        let f = CurlFetcher::from_config(&cfg);
        assert_eq!(f.max_redirections, 3);
        assert_eq!(f.connect_timeout, Some(Duration::from_secs(5)));
    }
}
