//! Fetch the contents of a URL, falling back to `curl` or `wget` when the
//! native client cannot speak TLS.

pub mod config;
pub mod error;
pub mod external;
pub mod fetcher;
pub mod logging;
pub mod native;
pub mod reason;
pub mod response;

pub use error::{FetchError, TransportError};
pub use external::{manual_download, CommandRunner, ExternalTool, ManualDownloader, SystemRunner};
pub use fetcher::{retrieve, UrlFetcher};
pub use native::{CurlFetcher, NativeFetcher};
pub use reason::{indicates_missing_secure_transport, SecureTransportMarkers};
pub use response::{Response, Source};
