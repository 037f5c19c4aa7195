use crate::external::{default_tools, ExternalTool};
use crate::reason::SecureTransportMarkers;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot locate config directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("config I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("timeout_secs must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
}

/// Global configuration loaded from `~/.config/ufetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UfetchConfig {
    /// Default native fetch timeout in seconds (None = wait indefinitely).
    #[serde(default)]
    pub timeout_secs: Option<f64>,
    /// Maximum redirects followed by the native client.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
    /// Native connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Failure reason substrings that mean "no TLS support here".
    #[serde(default)]
    pub secure_transport_markers: SecureTransportMarkers,
    /// External download programs, tried in order.
    #[serde(default = "default_tools")]
    pub tools: Vec<ExternalTool>,
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for UfetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_redirections: default_max_redirections(),
            connect_timeout_secs: None,
            secure_transport_markers: SecureTransportMarkers::default(),
            tools: default_tools(),
        }
    }
}

impl UfetchConfig {
    /// `timeout_secs` as a Duration; rejects zero, negative and non-finite values.
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.timeout_secs.map(timeout_from_secs).transpose()
    }
}

/// Convert a user-supplied number of seconds into a timeout.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(ConfigError::InvalidTimeout(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidTimeout(secs))
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ufetch")?;
    xdg_dirs
        .place_config_file("config.toml")
        .map_err(|source| ConfigError::Io {
            path: xdg_dirs.get_config_home(),
            source,
        })
}

/// Load configuration from the XDG path, creating a default file if none exists.
pub fn load_or_init() -> Result<UfetchConfig, ConfigError> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UfetchConfig, ConfigError> {
    if !path.exists() {
        let default_cfg = UfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, toml).map_err(io_err)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}

/// Read configuration from `path`; the file must exist.
pub fn load_from(path: &Path) -> Result<UfetchConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
