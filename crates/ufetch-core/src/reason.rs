//! Classify native failure reasons.
//!
//! The fallback to external programs is driven by substring matches on the
//! failure reason text. Keep every such match in this module.

use serde::{Deserialize, Serialize};

/// Reason emitted when the client has no handler for `https`.
pub const UNKNOWN_HTTPS_SCHEME: &str = "unknown url type: https";

/// Reason emitted when the TLS peer could not be verified.
pub const CERTIFICATE_VERIFY_FAILED: &str = "CERTIFICATE_VERIFY_FAILED";

/// Default markers, in the order they are checked.
pub const DEFAULT_MARKERS: [&str; 2] = [UNKNOWN_HTTPS_SCHEME, CERTIFICATE_VERIFY_FAILED];

/// True if `reason` says the native client cannot do secure transport.
pub fn indicates_missing_secure_transport(reason: &str) -> bool {
    DEFAULT_MARKERS.iter().any(|m| reason.contains(m))
}

/// Configurable marker list (from `secure_transport_markers` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecureTransportMarkers(pub Vec<String>);

impl Default for SecureTransportMarkers {
    fn default() -> Self {
        Self(DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect())
    }
}

impl SecureTransportMarkers {
    pub fn matches(&self, reason: &str) -> bool {
        self.0.iter().any(|m| !m.is_empty() && reason.contains(m.as_str()))
    }
}
